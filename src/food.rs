use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::board::{Board, Cell};

pub struct FoodSpawner {
    rng: ChaCha8Rng,
    enabled: bool,
}

impl FoodSpawner {
    /// `enabled` is false when neither growth nor score is tied to food, in
    /// which case food never appears.
    pub fn new(seed: Option<u64>, enabled: bool) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        FoodSpawner { rng, enabled }
    }

    pub fn maybe_spawn(&mut self, board: &Board, food: &mut Option<Cell>) {
        if food.is_some() || !self.enabled {
            return;
        }

        *food = board.free_cells().choose(&mut self.rng);
        if let Some(cell) = food {
            trace!(%cell, "food spawned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Wrap;

    #[test]
    fn test_spawns_on_a_free_cell() {
        let mut board = Board::new(3, 3, Wrap::None);
        for col in 0..3 {
            board.occupy(Cell::new(0, col)).unwrap();
            board.occupy(Cell::new(1, col)).unwrap();
        }

        let mut spawner = FoodSpawner::new(Some(7), true);
        let mut food = None;
        spawner.maybe_spawn(&board, &mut food);

        let cell = food.unwrap();
        assert_eq!(cell.row, 2);
        assert!(board.is_free(cell));
    }

    #[test]
    fn test_keeps_existing_food() {
        let board = Board::new(3, 3, Wrap::None);
        let mut spawner = FoodSpawner::new(Some(1), true);
        let mut food = Some(Cell::new(1, 1));
        spawner.maybe_spawn(&board, &mut food);
        assert_eq!(food, Some(Cell::new(1, 1)));
    }

    #[test]
    fn test_disabled_never_spawns() {
        let board = Board::new(3, 3, Wrap::None);
        let mut spawner = FoodSpawner::new(Some(1), false);
        let mut food = None;
        spawner.maybe_spawn(&board, &mut food);
        assert_eq!(food, None);
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut board = Board::new(1, 2, Wrap::None);
        board.occupy(Cell::new(0, 0)).unwrap();
        board.occupy(Cell::new(0, 1)).unwrap();

        let mut spawner = FoodSpawner::new(Some(3), true);
        let mut food = None;
        spawner.maybe_spawn(&board, &mut food);
        assert_eq!(food, None);
    }

    #[test]
    fn test_same_seed_same_placement() {
        let board = Board::new(10, 10, Wrap::Both);
        let mut a = FoodSpawner::new(Some(42), true);
        let mut b = FoodSpawner::new(Some(42), true);
        let (mut fa, mut fb) = (None, None);
        a.maybe_spawn(&board, &mut fa);
        b.maybe_spawn(&board, &mut fb);
        assert_eq!(fa, fb);
    }
}
