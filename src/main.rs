mod board;
mod config;
mod engine;
mod error;
mod food;
mod frontend;
mod game;
mod glyph;
mod input;
mod round;
mod snake;
mod term;
#[cfg(test)]
mod testing;

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use config::{Cli, GameConfig};
use error::SnakeError;
use term::{Palette, TermManager};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = GameConfig::from(&cli);
    let mut term = TermManager::new(Palette::new(), config.wrap, config.players);
    term.setup().context("failed to set up the terminal")?;

    let mut game = game::SnakeGame::new(config);
    let result = loop {
        // Each game ends on the game-over screen; G starts the next one
        match game.play(&mut term) {
            Ok(summary) => info!(
                rounds = summary.rounds,
                winner = ?summary.winner,
                scores = ?summary.scores,
                "game over"
            ),
            Err(err) => break err,
        }
    };

    term.restore().context("failed to restore the terminal")?;

    match result {
        SnakeError::Halted => Ok(()),
        err => Err(err).context("game aborted"),
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    // The screen belongs to the game, so logs only go to a file.
    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(cli.log_level)
            .init();
    }
    Ok(())
}
