//! User configuration for shrine.
//!
//! Config lives in a TOML file in the platform config directory (or wherever
//! `--config` points). Every section and key is optional; anything missing
//! takes its default, and the defaults reproduce the classic snowfall.

mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use shrine_core::CellMetrics;

pub use error::ConfigError;

/// A copy of the default config file, shipped for reference.
pub static DEFAULT_CONFIG: &str = include_str!("../default_config.toml");

/// Name of the config file inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the log file inside the data directory.
const LOG_FILE_NAME: &str = "shrine.log";

/// Most flakes a single snowfall may hold.
pub const MAX_FLAKE_COUNT: usize = 100_000;

/// The valid log levels. Based on the `tracing` crate.
#[derive(Deserialize, clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    #[default]
    Off,
}

impl LogLevel {
    /// The directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
            LogLevel::Off => "off",
        }
    }
}

/// Snowflake population and physical ranges.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SnowConfig {
    /// Number of flakes kept alive at once.
    pub flake_count: usize,
    /// Smallest flake radius in pixels.
    pub min_radius: f32,
    /// Largest flake radius in pixels.
    pub max_radius: f32,
    /// Slowest fall, in pixels per frame.
    pub min_fall_speed: f32,
    /// Fastest fall, in pixels per frame.
    pub max_fall_speed: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            flake_count: 200,
            min_radius: 1.0,
            max_radius: 4.0,
            min_fall_speed: 0.5,
            max_fall_speed: 1.5,
        }
    }
}

/// Pointer interaction.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
    /// Radius of the repulsion zone around the pointer, in pixels.
    pub repulsion_radius: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            repulsion_radius: 100.0,
        }
    }
}

/// How the animation maps onto the terminal.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Virtual pixel width of one terminal cell.
    pub cell_width_px: u16,
    /// Virtual pixel height of one terminal cell.
    pub cell_height_px: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let metrics = CellMetrics::default();
        Self {
            frame_rate: 60,
            cell_width_px: metrics.width_px,
            cell_height_px: metrics.height_px,
        }
    }
}

impl DisplayConfig {
    /// Cell size as [`CellMetrics`].
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics::new(self.cell_width_px, self.cell_height_px)
    }
}

/// Logging.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum log level.
    pub level: LogLevel,
    /// Where the log file is written.
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Off,
            path: default_log_path(),
        }
    }
}

/// All user config.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub snow: SnowConfig,
    pub pointer: PointerConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load config.
    ///
    /// An explicit `path` must exist. Without one the platform config file is
    /// used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the animation can't work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let snow = &self.snow;
        if snow.flake_count > MAX_FLAKE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "snow flake_count {} is above the limit of {MAX_FLAKE_COUNT}",
                snow.flake_count
            )));
        }
        let ranges = [
            ("snow min_radius", snow.min_radius),
            ("snow max_radius", snow.max_radius),
            ("snow min_fall_speed", snow.min_fall_speed),
            ("snow max_fall_speed", snow.max_fall_speed),
            ("pointer repulsion_radius", self.pointer.repulsion_radius),
        ];
        if let Some((name, value)) = ranges.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be a finite number, got {value}"
            )));
        }
        if snow.min_radius <= 0.0 || snow.min_radius > snow.max_radius {
            return Err(ConfigError::Invalid(format!(
                "snow radius range {}..={} must be positive and ascending",
                snow.min_radius, snow.max_radius
            )));
        }
        if snow.min_fall_speed <= 0.0 || snow.min_fall_speed > snow.max_fall_speed {
            return Err(ConfigError::Invalid(format!(
                "snow fall speed range {}..={} must be positive and ascending",
                snow.min_fall_speed, snow.max_fall_speed
            )));
        }
        if self.pointer.repulsion_radius < 0.0 {
            return Err(ConfigError::Invalid(
                "pointer repulsion_radius can't be negative".to_string(),
            ));
        }
        if self.display.frame_rate == 0 {
            return Err(ConfigError::Invalid(
                "display frame_rate must be at least 1".to_string(),
            ));
        }
        if self.display.cell_width_px == 0 || self.display.cell_height_px == 0 {
            return Err(ConfigError::Invalid(
                "display cell size must be at least 1x1 pixels".to_string(),
            ));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "shrine")
}

/// Platform location of the config file, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Platform location of the log file, falling back to the temp directory.
pub fn default_log_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.snow.flake_count, 200);
        assert_eq!(config.snow.min_radius, 1.0);
        assert_eq!(config.snow.max_radius, 4.0);
        assert_eq!(config.snow.min_fall_speed, 0.5);
        assert_eq!(config.snow.max_fall_speed, 1.5);
        assert_eq!(config.pointer.repulsion_radius, 100.0);
        assert_eq!(config.display.frame_rate, 60);
        assert_eq!(config.display.cell_metrics(), CellMetrics::new(8, 16));
        assert_eq!(config.log.level, LogLevel::Off);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_default_config_matches_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [snow]
            flake_count = 50

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.snow.flake_count, 50);
        assert_eq!(config.snow.max_radius, 4.0);
        assert_eq!(config.pointer, PointerConfig::default());
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.path, default_log_path());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = Config::default();
        config.snow.min_radius = 5.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.snow.min_fall_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.frame_rate = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.cell_height_px = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pointer.repulsion_radius = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.snow.flake_count = usize::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.snow.flake_count = MAX_FLAKE_COUNT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite_numbers() {
        for snippet in [
            "[snow]\nmax_radius = inf\n",
            "[snow]\nmin_radius = nan\n",
            "[snow]\nmax_fall_speed = nan\n",
            "[snow]\nmax_fall_speed = inf\n",
            "[pointer]\nrepulsion_radius = nan\n",
            "[pointer]\nrepulsion_radius = inf\n",
        ] {
            let config: Config = toml::from_str(snippet).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "accepted {snippet:?}"
            );
        }
    }

    #[test]
    fn test_load_missing_explicit_path_is_an_error() {
        let path = std::env::temp_dir().join("shrine-config-test-does-not-exist.toml");
        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "shrine-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[display]\nframe_rate = 30\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.display.frame_rate, 30);
        assert_eq!(config.display.cell_width_px, 8);
    }

    #[test]
    fn test_load_rejects_unparseable_file() {
        let path = std::env::temp_dir().join(format!(
            "shrine-config-test-bad-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[snow]\nflake_count = \"lots\"\n").unwrap();
        let result = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
