//! Configuration and CLI argument handling

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration from CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Interactive recipe card: steps, countdown and progress in the terminal")]
pub struct Config {
    /// JSON recipe file. Falls back to the RECIPE_FILE env var, then to the built-in recipe.
    #[arg(long, value_name = "PATH")]
    pub recipe: Option<PathBuf>,
    /// Read commands from stdin and print display changes to stdout (default is the full-screen card)
    #[arg(long)]
    pub pipe: bool,
    /// Length of one countdown second in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub tick_ms: u64,
    /// Write the plain-text card here when printing (Ctrl+P)
    #[arg(long, value_name = "PATH")]
    pub print_to: Option<PathBuf>,
    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug_log: bool,
}

impl Config {
    /// One simulated second. Never zero, so the tick source cannot spin.
    pub fn second(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Fill in the recipe path from `RECIPE_FILE` when none was given.
    pub fn recipe_from_env_if_empty(&mut self) {
        if self.recipe.is_none()
            && let Ok(s) = std::env::var("RECIPE_FILE")
            && !s.trim().is_empty()
        {
            self.recipe = Some(PathBuf::from(s.trim()));
        }
    }

    /// Log filter used when `--debug-log` is on and `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        "recipe_cook=debug"
    }
}
