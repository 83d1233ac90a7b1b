use tracing::info;

use crate::config::GameConfig;
use crate::engine::FrameEngine;
use crate::error::Result;
use crate::frontend::{Banner, Frontend};
use crate::round::{pause, RoundController};
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub rounds: u32,
    /// `None` on a tie, and always in a one-player game.
    pub winner: Option<usize>,
    pub scores: Vec<i64>,
}

pub struct SnakeGame {
    config: GameConfig,
    engine: FrameEngine,
    rounds_played: u32,
    state: GameState,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        let engine = FrameEngine::new(&config);
        SnakeGame { config, engine, rounds_played: 0, state: GameState::InProgress }
    }

    pub fn play<F: Frontend>(&mut self, frontend: &mut F) -> Result<GameSummary> {
        self.restart();

        while self.state == GameState::InProgress {
            let outcome = RoundController::new(&mut self.engine, frontend, &self.config).play()?;
            self.rounds_played += 1;
            info!(round = self.rounds_played, winner = ?outcome.winner, ticks = outcome.ticks, "round over");

            if game_over(&self.config, self.rounds_played, self.engine.snakes()) {
                self.state = GameState::Complete;
            }
        }

        let winner = game_winner(self.engine.snakes());
        let scores: Vec<i64> = self.engine.snakes().iter().map(|s| s.game_score).collect();

        frontend.draw_scores(self.engine.snakes())?;
        if self.engine.snakes().len() > 1 {
            frontend.show_banner(self.engine.snakes(), Banner::GameWinner(winner))?;
        }
        pause(frontend, self.engine.snakes(), "GAME OVER", self.config.delay_ms)?;

        Ok(GameSummary { rounds: self.rounds_played, winner, scores })
    }

    fn restart(&mut self) {
        for snake in self.engine.snakes_mut() {
            snake.game_score = 0;
        }
        self.rounds_played = 0;
        self.state = GameState::InProgress;
    }
}

/// One-player games last one round; otherwise stop at the round limit or
/// once anyone reaches the points threshold.
pub fn game_over(config: &GameConfig, rounds_played: u32, snakes: &[Snake]) -> bool {
    snakes.len() == 1
        || rounds_played >= config.until_rounds
        || config
            .until_points
            .map_or(false, |points| snakes.iter().any(|s| s.game_score >= points))
}

/// The snake whose total beats the lowest total. Equal totals tie.
pub fn game_winner(snakes: &[Snake]) -> Option<usize> {
    let lowest = snakes.iter().map(|s| s.game_score).min()?;
    snakes
        .iter()
        .filter(|s| s.game_score > lowest)
        .max_by_key(|s| s.game_score)
        .map(Snake::side)
}
