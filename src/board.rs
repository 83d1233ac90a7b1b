use std::fmt;

use crate::error::{Result, SnakeError};
use crate::snake::Direction;

/// A board coordinate. Coordinates on a non-wrapping axis may fall outside
/// the board after a move; such cells are never free.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wrap {
    None,
    Columns,
    Both,
}

impl Wrap {
    pub fn from_axes(axes: u8) -> Self {
        match axes {
            0 => Wrap::None,
            1 => Wrap::Columns,
            _ => Wrap::Both,
        }
    }

    pub fn rows(self) -> bool {
        self == Wrap::Both
    }

    pub fn cols(self) -> bool {
        self != Wrap::None
    }
}

pub const BOARD_ROWS: i32 = 22;
const OPEN_COLS: i32 = 23;
const WRAPPED_COLS: i32 = 22;

/// Fixed start cells, keyed by player count and wrap mode.
pub fn start_cells(players: usize, wrap: Wrap) -> &'static [Cell] {
    const SOLO: [Cell; 1] = [Cell::new(10, 11)];
    const DUEL_OPEN: [Cell; 2] = [Cell::new(10, 0), Cell::new(11, 22)];
    const DUEL_COLS: [Cell; 2] = [Cell::new(10, 5), Cell::new(11, 17)];
    const DUEL_BOTH: [Cell; 2] = [Cell::new(5, 5), Cell::new(16, 17)];

    match (players, wrap) {
        (1, _) => &SOLO,
        (_, Wrap::None) => &DUEL_OPEN,
        (_, Wrap::Columns) => &DUEL_COLS,
        (_, Wrap::Both) => &DUEL_BOTH,
    }
}

/// The playing field and its free-cell set.
///
/// Occupancy is a row-major grid so that iterating free cells is ordered,
/// which keeps seeded food placement reproducible.
pub struct Board {
    height: i32,
    width: i32,
    wrap: Wrap,
    occupied: Vec<bool>,
    free: usize,
}

impl Board {
    pub fn new(height: i32, width: i32, wrap: Wrap) -> Self {
        let cells = (height * width) as usize;
        Board { height, width, wrap, occupied: vec![false; cells], free: cells }
    }

    pub fn standard(wrap: Wrap) -> Self {
        let width = if wrap == Wrap::None { OPEN_COLS } else { WRAPPED_COLS };
        Board::new(BOARD_ROWS, width, wrap)
    }

    pub fn initialize(&mut self) {
        self.occupied.iter_mut().for_each(|c| *c = false);
        self.free = self.occupied.len();
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    pub fn cell_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn free_count(&self) -> usize {
        self.free
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.height).contains(&cell.row) && (0..self.width).contains(&cell.col)
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        self.index(cell).map_or(false, |i| !self.occupied[i])
    }

    pub fn occupy(&mut self, cell: Cell) -> Result<()> {
        match self.index(cell) {
            Some(i) if !self.occupied[i] => {
                self.occupied[i] = true;
                self.free -= 1;
                Ok(())
            }
            _ => Err(SnakeError::CellOccupied(cell)),
        }
    }

    pub fn release(&mut self, cell: Cell) -> Result<()> {
        match self.index(cell) {
            Some(i) if self.occupied[i] => {
                self.occupied[i] = false;
                self.free += 1;
                Ok(())
            }
            _ => Err(SnakeError::CellAlreadyFree(cell)),
        }
    }

    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(move |(i, _)| Cell::new(i as i32 / width, i as i32 % width))
    }

    /// Steps one cell in `direction`, wrapping on the axes configured to wrap.
    pub fn translate(&self, cell: Cell, direction: Direction) -> Cell {
        let (dr, dc) = direction.delta();
        let mut row = cell.row + dr;
        let mut col = cell.col + dc;

        if self.wrap.cols() {
            col = col.rem_euclid(self.width);
        }
        if self.wrap.rows() {
            row = row.rem_euclid(self.height);
        }

        Cell::new(row, col)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some((cell.row * self.width + cell.col) as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    #[test]
    fn test_occupy_and_release() {
        let mut board = Board::new(4, 5, Wrap::None);
        assert_eq!(board.free_count(), 20);

        board.occupy(Cell::new(1, 1)).unwrap();
        assert!(!board.is_free(Cell::new(1, 1)));
        assert_eq!(board.free_count(), 19);

        board.release(Cell::new(1, 1)).unwrap();
        assert!(board.is_free(Cell::new(1, 1)));
        assert_eq!(board.free_count(), 20);
    }

    #[test]
    fn test_double_occupy_is_an_invariant_violation() {
        let mut board = Board::new(4, 5, Wrap::None);
        board.occupy(Cell::new(2, 3)).unwrap();

        assert!(matches!(board.occupy(Cell::new(2, 3)), Err(SnakeError::CellOccupied(_))));
        assert!(matches!(board.release(Cell::new(0, 0)), Err(SnakeError::CellAlreadyFree(_))));
    }

    #[test]
    fn test_off_board_cells_are_never_free() {
        let board = Board::new(4, 5, Wrap::None);
        assert!(!board.is_free(Cell::new(-1, 0)));
        assert!(!board.is_free(Cell::new(0, 5)));
        assert!(!board.is_free(Cell::new(4, 0)));
    }

    #[test]
    fn test_translate_open_board_leaves_the_grid() {
        let board = Board::new(4, 5, Wrap::None);
        let below = board.translate(Cell::new(3, 2), Down);
        assert_eq!(below, Cell::new(4, 2));
        assert!(!board.is_free(below));
    }

    #[test]
    fn test_translate_wraps_columns_only() {
        let board = Board::new(4, 5, Wrap::Columns);
        assert_eq!(board.translate(Cell::new(1, 4), Right), Cell::new(1, 0));
        assert_eq!(board.translate(Cell::new(1, 0), Left), Cell::new(1, 4));
        assert_eq!(board.translate(Cell::new(3, 2), Down), Cell::new(4, 2));
    }

    #[test]
    fn test_translate_wraps_both_axes() {
        let board = Board::new(4, 5, Wrap::Both);
        assert_eq!(board.translate(Cell::new(3, 2), Down), Cell::new(0, 2));
        assert_eq!(board.translate(Cell::new(0, 2), Up), Cell::new(3, 2));
    }

    #[test]
    fn test_free_cells_are_row_major() {
        let mut board = Board::new(2, 2, Wrap::None);
        board.occupy(Cell::new(0, 1)).unwrap();
        let free: Vec<Cell> = board.free_cells().collect();
        assert_eq!(free, vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn test_standard_sizes_and_start_cells() {
        assert_eq!(Board::standard(Wrap::None).width(), 23);
        assert_eq!(Board::standard(Wrap::Both).width(), 22);

        for wrap in [Wrap::None, Wrap::Columns, Wrap::Both] {
            let board = Board::standard(wrap);
            for players in 1..=2 {
                let starts = start_cells(players, wrap);
                assert_eq!(starts.len(), players);
                assert!(starts.iter().all(|c| board.contains(*c)));
            }
        }
    }
}
