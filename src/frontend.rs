use crossterm::event::KeyEvent;

use crate::engine::{FrameEngine, TickReport};
use crate::error::Result;
use crate::glyph::HeadGlyph;
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Paused(&'static str),
    RoundWinner(Option<usize>),
    GameWinner(Option<usize>),
}

/// The game's view of the outside world: where keys come from, where the
/// picture goes, and how time passes.
pub trait Frontend {
    /// Every key pressed since the last poll, oldest first. Never blocks.
    fn poll_keys(&mut self) -> Result<Vec<KeyEvent>>;

    fn nap(&mut self, ms: u64);

    fn beep(&mut self) -> Result<()>;

    fn draw_board(&mut self, engine: &FrameEngine) -> Result<()>;

    fn draw_head(&mut self, snake: &Snake, glyph: HeadGlyph) -> Result<()>;

    fn draw_frame(&mut self, engine: &FrameEngine, report: &TickReport) -> Result<()>;

    fn draw_scores(&mut self, snakes: &[Snake]) -> Result<()>;

    fn show_banner(&mut self, snakes: &[Snake], banner: Banner) -> Result<()>;

    fn refresh(&mut self) -> Result<()>;
}
