use std::cmp::max;

use tracing::{debug, instrument, warn};

use crate::board::{start_cells, Board, Cell};
use crate::config::GameConfig;
use crate::error::{Result, SnakeError};
use crate::food::FoodSpawner;
use crate::glyph::{joint_for, Joint};
use crate::input::{ControlSet, InputRouter};
use crate::snake::{Direction, Snake};

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeStep {
    pub old_head: Cell,
    pub new_head: Cell,
    /// Joint to draw over the old head, absent when that segment was trimmed.
    pub joint: Option<Joint>,
    pub ate: bool,
    pub died: bool,
}

/// Everything a renderer needs to bring the screen up to date after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub steps: Vec<SnakeStep>,
    pub vacated: Vec<Cell>,
    /// Two heads side by side in one row; the renderer draws a divider.
    pub heads_adjacent: bool,
    pub food: Option<Cell>,
}

impl TickReport {
    pub fn ate_food(&self) -> bool {
        self.steps.iter().any(|s| s.ate)
    }
}

/// Owns the board, the snakes and the food, and advances them one tick at a
/// time. Nothing else mutates them while a round is running.
pub struct FrameEngine {
    board: Board,
    snakes: Vec<Snake>,
    food: Option<Cell>,
    spawner: FoodSpawner,
    router: InputRouter,
    grow_start: f64,
    grow_time: f64,
    grow_food: f64,
    score_food: i64,
}

impl FrameEngine {
    pub fn new(config: &GameConfig) -> Self {
        let mut snakes = vec![Snake::new(0, config.color)];
        if config.players == 2 {
            snakes.push(Snake::new(1, config.color.other()));
        }

        if config.score_time != 0 {
            warn!(score_time = config.score_time, "per-frame score rate is not applied");
        }

        FrameEngine {
            board: Board::standard(config.wrap),
            snakes,
            food: None,
            spawner: FoodSpawner::new(config.seed, config.food_enabled()),
            router: InputRouter::new(config.players),
            grow_start: config.grow_start,
            grow_time: config.grow_time,
            grow_food: config.grow_food,
            score_food: config.score_food,
        }
    }

    #[cfg(test)]
    pub fn with_board(config: &GameConfig, board: Board) -> Self {
        let mut engine = FrameEngine::new(config);
        engine.board = board;
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn snakes_mut(&mut self) -> &mut [Snake] {
        &mut self.snakes
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[cfg(test)]
    pub fn set_food(&mut self, food: Option<Cell>) {
        self.food = food;
    }

    pub fn reset_round(&mut self) -> Result<()> {
        let starts = start_cells(self.snakes.len(), self.board.wrap());
        self.reset_round_at(starts.to_vec())
    }

    pub fn reset_round_at(&mut self, starts: Vec<Cell>) -> Result<()> {
        self.board.initialize();
        for (snake, start) in self.snakes.iter_mut().zip(starts) {
            snake.reset(&mut self.board, start, self.grow_start)?;
        }
        self.food = None;
        self.spawner.maybe_spawn(&self.board, &mut self.food);
        Ok(())
    }

    pub fn steer(&mut self, set: ControlSet, direction: Direction) -> bool {
        self.router.steer(&mut self.snakes, set, direction)
    }

    pub fn all_ready(&self) -> bool {
        self.snakes.iter().all(Snake::is_ready)
    }

    pub fn any_dead(&self) -> bool {
        self.snakes.iter().any(|s| !s.alive)
    }

    #[instrument(level = "trace", skip_all)]
    pub fn tick(&mut self, intents: &[(ControlSet, Direction)]) -> Result<TickReport> {
        for snake in self.snakes.iter_mut() {
            snake.previous_direction = snake.direction;
        }
        for &(set, direction) in intents {
            self.router.steer(&mut self.snakes, set, direction);
        }

        let mut steps = Vec::with_capacity(self.snakes.len());
        for snake in self.snakes.iter_mut() {
            let direction = snake.direction.ok_or(SnakeError::Unsteered(snake.side()))?;
            let old_head = snake.head();
            let new_head = self.board.translate(old_head, direction);
            snake.length_target += self.grow_time;

            let ate = self.food == Some(new_head);
            if ate {
                self.food = None;
                snake.round_score = max(0, snake.round_score + self.score_food);
                snake.length_target = (snake.length_target + self.grow_food).max(0.0);
            }

            steps.push(SnakeStep { old_head, new_head, joint: None, ate, died: false });
        }

        // Trim before testing collisions so vacated tail cells can be entered.
        let mut vacated = Vec::new();
        for snake in self.snakes.iter_mut() {
            while let Some(cell) = snake.pop_excess() {
                self.board.release(cell)?;
                vacated.push(cell);
            }
        }

        for (snake, step) in self.snakes.iter_mut().zip(steps.iter_mut()) {
            if let (Some(current), Some(previous), false) =
                (snake.direction, snake.previous_direction, snake.body().is_empty())
            {
                step.joint = joint_for(current, previous);
            }
            if !self.board.is_free(step.new_head) {
                snake.alive = false;
            }
        }

        // Two live heads entering the same free cell.
        for i in 0..steps.len() {
            for j in i + 1..steps.len() {
                if steps[i].new_head == steps[j].new_head && self.snakes[i].alive && self.snakes[j].alive {
                    self.snakes[i].alive = false;
                    self.snakes[j].alive = false;
                }
            }
        }

        // Heads passing through each other look free to the test above.
        if steps.len() == 2
            && steps[0].new_head == steps[1].old_head
            && steps[1].new_head == steps[0].old_head
        {
            for (snake, step) in self.snakes.iter_mut().zip(steps.iter_mut()) {
                step.new_head = step.old_head;
                snake.alive = false;
            }
        }

        for (snake, step) in self.snakes.iter_mut().zip(steps.iter_mut()) {
            snake.push_head(step.new_head);
            if snake.alive {
                self.board.occupy(step.new_head)?;
            } else {
                step.died = true;
                debug!(side = snake.side(), cell = %step.new_head, "snake died");
            }
        }

        let heads_adjacent = steps.len() == 2
            && steps[0].new_head.row == steps[1].new_head.row
            && (steps[0].new_head.col - steps[1].new_head.col).abs() == 1;

        self.spawner.maybe_spawn(&self.board, &mut self.food);

        Ok(TickReport { steps, vacated, heads_adjacent, food: self.food })
    }
}
