//! Command line arguments.

use std::path::PathBuf;

use shrine_config::{Config, LogLevel};

/// Snowfall over a quiet shrine, right in the terminal.
#[derive(clap::Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct CliArgs {
    /// Config file to use instead of the one in the platform config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of snowflakes.
    #[arg(short, long)]
    pub flakes: Option<usize>,

    /// Maximum log level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Where to write the log file.
    #[arg(long)]
    pub log_path: Option<PathBuf>,
}

impl CliArgs {
    /// Layer the command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(flakes) = self.flakes {
            config.snow.flake_count = flakes;
        }
        if let Some(level) = self.log_level {
            config.log.level = level;
        }
        if let Some(path) = &self.log_path {
            config.log.path.clone_from(path);
        }
    }
}
