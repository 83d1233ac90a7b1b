use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::{FrameEngine, TickReport};
use crate::error::Result;
use crate::frontend::{Banner, Frontend};
use crate::glyph::HeadGlyph;
use crate::snake::Snake;

const MAX_POLLS: usize = 100_000;

pub fn ch(c: char) -> KeyEvent {
    ScriptedFrontend::key(KeyCode::Char(c))
}

/// Plays back queued key batches, one per poll. Once the script runs out
/// every poll answers G, so pause screens resume and steering is unchanged.
pub struct ScriptedFrontend {
    script: VecDeque<Vec<KeyEvent>>,
    polls: usize,
    pub naps: Vec<u64>,
    pub beeps: usize,
    pub frames: usize,
    pub boards: usize,
    pub heads: Vec<(usize, HeadGlyph)>,
    pub banners: Vec<Banner>,
}

impl ScriptedFrontend {
    pub fn new(script: Vec<Vec<KeyEvent>>) -> Self {
        ScriptedFrontend {
            script: script.into_iter().collect(),
            polls: 0,
            naps: Vec::new(),
            beeps: 0,
            frames: 0,
            boards: 0,
            heads: Vec::new(),
            banners: Vec::new(),
        }
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }
}

impl Frontend for ScriptedFrontend {
    fn poll_keys(&mut self) -> Result<Vec<KeyEvent>> {
        self.polls += 1;
        assert!(self.polls < MAX_POLLS, "scripted game never finished");
        Ok(self.script.pop_front().unwrap_or_else(|| vec![ch('g')]))
    }

    fn nap(&mut self, ms: u64) {
        self.naps.push(ms);
    }

    fn beep(&mut self) -> Result<()> {
        self.beeps += 1;
        Ok(())
    }

    fn draw_board(&mut self, _engine: &FrameEngine) -> Result<()> {
        self.boards += 1;
        Ok(())
    }

    fn draw_head(&mut self, snake: &Snake, glyph: HeadGlyph) -> Result<()> {
        self.heads.push((snake.side(), glyph));
        Ok(())
    }

    fn draw_frame(&mut self, _engine: &FrameEngine, _report: &TickReport) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn draw_scores(&mut self, _snakes: &[Snake]) -> Result<()> {
        Ok(())
    }

    fn show_banner(&mut self, _snakes: &[Snake], banner: Banner) -> Result<()> {
        self.banners.push(banner);
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }
}
