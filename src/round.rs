use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::engine::FrameEngine;
use crate::error::{Result, SnakeError};
use crate::frontend::{Banner, Frontend};
use crate::glyph::HeadGlyph;
use crate::input::{key_action, KeyAction};
use crate::snake::Snake;

const IDLE_POLL_MS: u64 = 100;
const COUNTDOWN_MS: u64 = 500;
const END_BELL_MS: u64 = 200;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundState {
    AwaitingDirections,
    Countdown,
    Active,
    Resolved,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub winner: Option<usize>,
    pub ticks: u64,
}

pub struct RoundController<'a, F: Frontend> {
    engine: &'a mut FrameEngine,
    frontend: &'a mut F,
    config: &'a GameConfig,
    state: RoundState,
    ticks: u64,
}

impl<'a, F: Frontend> RoundController<'a, F> {
    pub fn new(engine: &'a mut FrameEngine, frontend: &'a mut F, config: &'a GameConfig) -> Self {
        RoundController { engine, frontend, config, state: RoundState::AwaitingDirections, ticks: 0 }
    }

    pub fn play(mut self) -> Result<RoundOutcome> {
        self.enter()?;

        loop {
            trace!(state = ?self.state, "round state");
            self.state = match self.state {
                RoundState::AwaitingDirections => self.await_directions()?,
                RoundState::Countdown => self.count_down()?,
                RoundState::Active => self.run_active()?,
                RoundState::Resolved => return self.resolve(),
            };
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.engine.reset_round()?;
        debug!(
            players = self.engine.snakes().len(),
            cells = self.engine.board().cell_count(),
            food = ?self.engine.food(),
            "round start"
        );

        self.frontend.draw_board(self.engine)?;
        self.draw_heads(|_| HeadGlyph::Waiting)?;
        self.frontend.refresh()
    }

    fn await_directions(&mut self) -> Result<RoundState> {
        while !self.engine.all_ready() {
            self.frontend.nap(IDLE_POLL_MS);

            for key in self.frontend.poll_keys()? {
                match key_action(&key) {
                    KeyAction::Steer(set, direction) => {
                        self.engine.steer(set, direction);
                    }
                    KeyAction::Pause => pause(self.frontend, self.engine.snakes(), " =PAUSE=", self.config.delay_ms)?,
                    KeyAction::Quit => return Err(SnakeError::Halted),
                    _ => {}
                }
            }

            self.draw_heads(|s| if s.is_ready() { HeadGlyph::Ready } else { HeadGlyph::Waiting })?;
            self.frontend.refresh()?;
        }

        Ok(RoundState::Countdown)
    }

    fn count_down(&mut self) -> Result<RoundState> {
        for n in (1..=3).rev() {
            self.draw_heads(|_| HeadGlyph::Countdown(n))?;
            self.frontend.refresh()?;
            self.frontend.beep()?;
            self.frontend.nap(COUNTDOWN_MS);
        }

        self.draw_heads(|_| HeadGlyph::Normal)?;
        self.frontend.refresh()?;
        self.frontend.nap(self.config.delay_ms);

        Ok(RoundState::Active)
    }

    fn run_active(&mut self) -> Result<RoundState> {
        while !self.engine.any_dead() {
            let mut intents = Vec::new();
            for key in self.frontend.poll_keys()? {
                match key_action(&key) {
                    KeyAction::Steer(set, direction) => intents.push((set, direction)),
                    KeyAction::Pause => pause(self.frontend, self.engine.snakes(), " =PAUSE=", self.config.delay_ms)?,
                    KeyAction::Quit => return Err(SnakeError::Halted),
                    _ => {}
                }
            }

            let report = self.engine.tick(&intents)?;
            self.ticks += 1;

            if report.ate_food() {
                self.frontend.beep()?;
            }
            self.frontend.draw_frame(self.engine, &report)?;
            self.frontend.refresh()?;
            self.frontend.nap(self.config.delay_ms);
        }

        Ok(RoundState::Resolved)
    }

    fn resolve(&mut self) -> Result<RoundOutcome> {
        let winner = settle_scores(self.engine.snakes_mut(), self.config.score_end);
        info!(
            ?winner,
            ticks = self.ticks,
            scores = ?self.engine.snakes().iter().map(|s| (s.round_score, s.game_score)).collect::<Vec<_>>(),
            "round resolved"
        );

        for _ in 0..3 {
            self.frontend.beep()?;
            self.frontend.nap(END_BELL_MS);
        }

        self.frontend.draw_scores(self.engine.snakes())?;

        if self.engine.snakes().len() > 1 {
            self.frontend.show_banner(self.engine.snakes(), Banner::RoundWinner(winner))?;
            pause(self.frontend, self.engine.snakes(), "ROUND END", self.config.delay_ms)?;
        }

        Ok(RoundOutcome { winner, ticks: self.ticks })
    }

    fn draw_heads(&mut self, glyph: impl Fn(&Snake) -> HeadGlyph) -> Result<()> {
        for snake in self.engine.snakes() {
            self.frontend.draw_head(snake, glyph(snake))?;
        }
        Ok(())
    }
}

/// Pays survivors the end-of-round bonus and banks non-negative round
/// scores into the game total. Returns the lone survivor, if any.
pub fn settle_scores(snakes: &mut [Snake], end_bonus: i64) -> Option<usize> {
    for snake in snakes.iter_mut().filter(|s| s.alive) {
        snake.round_score += end_bonus;
        if snake.round_score >= 0 {
            snake.game_score += snake.round_score;
        }
    }

    let mut survivors = snakes.iter().filter(|s| s.alive);
    match (survivors.next(), survivors.next()) {
        (Some(only), None) => Some(only.side()),
        _ => None,
    }
}

/// Blocks until the player presses G. H or Ctrl+C halts the program.
pub fn pause<F: Frontend>(frontend: &mut F, snakes: &[Snake], heading: &'static str, delay_ms: u64) -> Result<()> {
    frontend.show_banner(snakes, Banner::Paused(heading))?;
    frontend.refresh()?;

    let mut paused = true;
    while paused {
        frontend.nap(IDLE_POLL_MS);

        for key in frontend.poll_keys()? {
            match key_action(&key) {
                KeyAction::Go => paused = false,
                KeyAction::Halt | KeyAction::Quit => return Err(SnakeError::Halted),
                _ => {}
            }
        }
    }

    frontend.draw_scores(snakes)?;
    frontend.refresh()?;
    frontend.nap(delay_ms);
    Ok(())
}
