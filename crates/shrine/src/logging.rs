//! File logging. The terminal belongs to the UI, so logs go to a file.

use std::sync::Mutex;

use color_eyre::eyre::{ContextCompat as _, Result};
use shrine_config::{LogConfig, LogLevel};
use tracing_subscriber::{
    EnvFilter, Layer as _, filter::LevelFilter, layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

/// Env variable holding `EnvFilter` directives that replace the configured level.
const LOG_ENV: &str = "SHRINE_LOG";

/// Crates whose spans and events are logged at the configured level.
const CRATES: &[&str] = &["shrine", "shrine_snow", "shrine_config"];

/// Start writing logs to the configured file, unless logging is off.
///
/// Returns whether logging was enabled.
pub fn setup(log: &LogConfig) -> Result<bool> {
    let user_filters = std::env::var(LOG_ENV).ok();
    if log.level == LogLevel::Off && user_filters.is_none() {
        return Ok(false);
    }

    let directory = log
        .path
        .parent()
        .context("Couldn't get log path's parent")?;
    std::fs::create_dir_all(directory)?;
    let file = std::fs::File::create(&log.path)?;

    let filters = match user_filters {
        Some(directives) => EnvFilter::builder()
            .with_default_directive(LevelFilter::ERROR.into())
            .parse_lossy(directives),
        None => EnvFilter::new(crate_directives(log.level)),
    };

    let logfile_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(filters);

    tracing_subscriber::registry().with(logfile_layer).try_init()?;
    tracing::info!(path = %log.path.display(), "Logging started");
    Ok(true)
}

fn crate_directives(level: LogLevel) -> String {
    let level = level.as_directive();
    CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
