use std::io;

use thiserror::Error;

use crate::board::Cell;

#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("invariant violated: cell {0} is already occupied")]
    CellOccupied(Cell),

    #[error("invariant violated: cell {0} is already free")]
    CellAlreadyFree(Cell),

    #[error("invariant violated: snake {0} moved without a direction")]
    Unsteered(usize),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("halted by player")]
    Halted,
}

impl From<crossterm::ErrorKind> for SnakeError {
    fn from(err: crossterm::ErrorKind) -> Self {
        match err {
            crossterm::ErrorKind::IoError(io) => SnakeError::Terminal(io),
            other => SnakeError::Terminal(io::Error::new(io::ErrorKind::Other, other.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnakeError>;
