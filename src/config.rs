//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;

use crate::types::{Difficulty, Theme};

/// Terminal memory game: flip cards, find the pairs.
#[derive(Parser, Debug, Clone)]
#[command(name = "tui-memory", version, about)]
pub struct AppConfig {
    /// Starting difficulty: easy, medium or hard.
    #[arg(short, long, default_value = "medium", env = "TUI_MEMORY_DIFFICULTY")]
    pub difficulty: String,

    /// Symbol theme: gaming, sports, animals, food or nature.
    #[arg(short, long, default_value = "gaming", env = "TUI_MEMORY_THEME")]
    pub theme: String,

    /// Shuffle seed (defaults to the current time).
    #[arg(long)]
    pub seed: Option<u32>,

    /// Directory for preferences, stats and records.
    #[arg(long, env = "TUI_MEMORY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Draw letters instead of emoji.
    #[arg(long)]
    pub ascii: bool,

    /// Write logs to this file (the terminal is owned by the game).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Unknown names fall back to the default difficulty.
    pub fn difficulty(&self) -> Difficulty {
        let difficulty = Difficulty::from_str_or_default(&self.difficulty);
        if Difficulty::from_str(&self.difficulty).is_none() {
            tracing::warn!(value = %self.difficulty, "unknown difficulty, using {}", difficulty.as_str());
        }
        difficulty
    }

    /// Unknown names fall back to the default theme.
    pub fn theme(&self) -> Theme {
        let theme = Theme::from_str_or_default(&self.theme);
        if Theme::from_str(&self.theme).is_none() {
            tracing::warn!(value = %self.theme, "unknown theme, using {}", theme.as_str());
        }
        theme
    }

    /// Explicit seed, or one derived from the wall clock.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
