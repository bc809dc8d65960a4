//! Player configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_hanoi::MAX_DISKS;
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "strictly_hanoi.toml";

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HanoiConfig {
    /// Disks in a new round.
    #[serde(default = "default_disks")]
    disks: usize,

    /// Round time limit in seconds; 0 plays without a clock.
    #[serde(default = "default_time_limit_secs")]
    time_limit_secs: u64,

    /// Largest disk count a player may choose.
    #[serde(default = "default_max_disks")]
    max_disks: usize,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    log_level: String,

    /// Print the optimal solution after running out of time.
    #[serde(default)]
    show_solution_on_loss: bool,
}

#[instrument]
fn default_disks() -> usize {
    3
}

#[instrument]
fn default_time_limit_secs() -> u64 {
    60
}

#[instrument]
fn default_max_disks() -> usize {
    MAX_DISKS
}

#[instrument]
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HanoiConfig {
    fn default() -> Self {
        Self {
            disks: default_disks(),
            time_limit_secs: default_time_limit_secs(),
            max_disks: default_max_disks(),
            log_level: default_log_level(),
            show_solution_on_loss: false,
        }
    }
}

impl HanoiConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(disks = config.disks, time_limit_secs = config.time_limit_secs, "Config loaded successfully");
        Ok(config)
    }

    /// Loads an explicit config file, or the default file if it exists, or
    /// falls back to built-in defaults.
    ///
    /// An explicitly named file must exist.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        disks: Option<usize>,
        time_limit_secs: Option<u64>,
        log_level: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(disks) = disks {
            self.disks = disks;
        }
        if let Some(secs) = time_limit_secs {
            self.time_limit_secs = secs;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that disk counts are within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DISKS).contains(&self.max_disks) {
            return Err(ConfigError::new(format!(
                "max_disks must be 1-{}, got {}",
                MAX_DISKS, self.max_disks
            )));
        }
        if !(1..=self.max_disks).contains(&self.disks) {
            return Err(ConfigError::new(format!(
                "disks must be 1-{}, got {}",
                self.max_disks, self.disks
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
