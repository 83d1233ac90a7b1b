use std::collections::VecDeque;

use crate::board::{Board, Cell};
use crate::error::Result;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    #[cfg(test)]
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Cyan,
    Magenta,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::Cyan => Color::Magenta,
            Color::Magenta => Color::Cyan,
        }
    }
}

/// One player's snake. Identity, colour and game score live for the whole
/// game; everything else is reset at the start of each round.
pub struct Snake {
    side: usize,
    color: Color,
    pub direction: Option<Direction>,
    pub previous_direction: Option<Direction>,
    body: VecDeque<Cell>,
    pub length_target: f64,
    pub round_score: i64,
    pub game_score: i64,
    pub alive: bool,
}

impl Snake {
    pub fn new(side: usize, color: Color) -> Self {
        Snake {
            side,
            color,
            direction: None,
            previous_direction: None,
            body: VecDeque::new(),
            length_target: 0.0,
            round_score: 0,
            game_score: 0,
            alive: true,
        }
    }

    pub fn reset(&mut self, board: &mut Board, start: Cell, length: f64) -> Result<()> {
        self.direction = None;
        self.previous_direction = None;
        self.body.clear();
        self.body.push_back(start);
        self.length_target = length;
        self.alive = true;
        self.round_score = 0;
        board.occupy(start)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        // The engine never leaves a body empty between ticks.
        *self.body.back().expect("snake body is empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_ready(&self) -> bool {
        self.direction.is_some()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    /// Pops the oldest segment while the body is longer than the target.
    pub(crate) fn pop_excess(&mut self) -> Option<Cell> {
        if self.body.len() as f64 > self.length_target {
            self.body.pop_front()
        } else {
            None
        }
    }
}
