//! Command line settings with environment fallbacks.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use labyrinth_sections::command::SectionId;
use labyrinth_sections::config::GameConfig;

/// Terminal maze quiz: walk the labyrinth, answer the guards, find the exit.
#[derive(Debug, Clone, Parser)]
#[command(name = "labyrinth", version, about)]
pub struct Settings {
    /// Maze width in rooms, borders included.
    #[arg(long, env = "LABYRINTH_WIDTH", default_value_t = 10)]
    pub width: usize,

    /// Maze height in rooms, entrance and exit rows included.
    #[arg(long, env = "LABYRINTH_HEIGHT", default_value_t = 10)]
    pub height: usize,

    /// Seed for a reproducible maze and question order.
    #[arg(long, env = "LABYRINTH_SEED")]
    pub seed: Option<u64>,

    /// Input polling rate in ticks per second.
    #[arg(long, env = "LABYRINTH_FPS", default_value_t = 60)]
    pub fps: u32,

    /// Question reveal speed in characters per second.
    #[arg(long, default_value_t = 40)]
    pub typing_speed: u32,

    /// Directory whose JSON files override the built-in tables.
    #[arg(long, env = "LABYRINTH_RESOURCES")]
    pub resources: Option<PathBuf>,

    /// File that receives the JSON log.
    #[arg(long, env = "LABYRINTH_LOG", default_value = "labyrinth.log")]
    pub log_file: PathBuf,

    /// Run a single section, then show what it produced.
    #[arg(long, value_parser = parse_section)]
    pub section: Option<SectionId>,
}

impl Settings {
    /// Interval between input polls.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// The gameplay subset handed to the sections.
    #[must_use]
    pub fn to_game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            ..GameConfig::default()
        }
        .with_typing_speed(self.typing_speed)
    }
}

fn parse_section(name: &str) -> Result<SectionId, String> {
    name.parse::<SectionId>().map_err(|err| err.to_string())
}
