use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use crate::board::Wrap;
use crate::snake::Color;

const RULES: &str = "\
Rules:
  Move your snake around the board to collect food and avoid crashing.
  Snakes move constantly and can only change direction, not speed.
  Running into a wall or any snake's tail is fatal and ends the round.
  A one-player game lasts one round. Only the player who survives a round
  adds that round's score to their game total.

Keys:
  WASD or arrow keys steer. In a two-player game player one uses WASD and
  player two the arrows. Each round waits until every player has chosen a
  direction. Tab or Enter pauses; when paused press G to go or H to halt.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Cyan,
    Magenta,
}

#[derive(Parser, Debug)]
#[command(name = "duel-snake")]
#[command(version, about = "One or two player snake for the terminal", after_help = RULES)]
pub struct Cli {
    /// Number of players
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub players: u8,

    /// Colour of player one
    #[arg(long, value_enum, default_value = "cyan")]
    pub color: ColorArg,

    /// Wrap the world around on this many axes
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub wrap: u8,

    /// Milliseconds between frames
    #[arg(long, default_value_t = 100)]
    pub delay: u64,

    /// Tail segments a snake starts with
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_parser = clap::value_parser!(i64).range(0..))]
    pub grow_start: i64,

    /// Segments grown every frame
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = non_negative)]
    pub grow_time: f64,

    /// Segments grown per food eaten
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub grow_food: i64,

    /// Points accrued every frame (accepted but has no effect)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub score_time: i64,

    /// Points per food eaten
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub score_food: i64,

    /// Bonus points for surviving a round
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub score_end: i64,

    /// End the game once a player has this many points
    #[arg(long)]
    pub until_points: Option<i64>,

    /// End the game after this many rounds
    #[arg(long, default_value_t = 5)]
    pub until_rounds: u32,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

fn non_negative(arg: &str) -> Result<f64, String> {
    match arg.parse::<f64>() {
        Ok(value) if value >= 0.0 => Ok(value),
        Ok(_) => Err("must not be negative".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub players: usize,
    pub color: Color,
    pub wrap: Wrap,
    pub delay_ms: u64,
    pub grow_start: f64,
    pub grow_time: f64,
    pub grow_food: f64,
    pub score_time: i64,
    pub score_food: i64,
    pub score_end: i64,
    pub until_points: Option<i64>,
    pub until_rounds: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            players: 1,
            color: Color::Cyan,
            wrap: Wrap::None,
            delay_ms: 100,
            grow_start: 0.0,
            grow_time: 0.0,
            grow_food: 1.0,
            score_time: 0,
            score_food: 1,
            score_end: 0,
            until_points: None,
            until_rounds: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn food_enabled(&self) -> bool {
        self.grow_food != 0.0 || self.score_food != 0
    }
}

impl From<&Cli> for GameConfig {
    fn from(cli: &Cli) -> Self {
        GameConfig {
            players: cli.players as usize,
            color: match cli.color {
                ColorArg::Cyan => Color::Cyan,
                ColorArg::Magenta => Color::Magenta,
            },
            wrap: Wrap::from_axes(cli.wrap),
            delay_ms: cli.delay,
            grow_start: cli.grow_start as f64,
            grow_time: cli.grow_time,
            grow_food: cli.grow_food as f64,
            score_time: cli.score_time,
            score_food: cli.score_food,
            score_end: cli.score_end,
            until_points: cli.until_points,
            until_rounds: cli.until_rounds,
            seed: cli.seed,
        }
    }
}
