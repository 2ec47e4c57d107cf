//! Tracker runtime configuration.
//!
//! # Responsibility
//! - Hold the data file, logging and predictor settings chosen at startup.
//! - Provide defaults relative to a base directory.

use crate::analysis::predictor::FeatureSet;
use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Storage file name used when none is configured.
pub const DEFAULT_DATA_FILE: &str = "user_data.json";
/// Log directory name used when none is configured.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Startup configuration for the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub data_file: PathBuf,
    /// Must be absolute before logging is initialized.
    pub log_dir: PathBuf,
    pub log_level: String,
    pub feature_set: FeatureSet,
}

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDataFile,
    RelativeLogDir(PathBuf),
    UnsupportedLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataFile => write!(f, "data file path cannot be empty"),
            Self::RelativeLogDir(dir) => {
                write!(f, "log dir must be an absolute path, got `{}`", dir.display())
            }
            Self::UnsupportedLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

impl TrackerConfig {
    /// Defaults rooted at `base_dir`: `user_data.json` and `logs/`.
    pub fn with_base_dir(base_dir: &Path) -> Self {
        Self {
            data_file: base_dir.join(DEFAULT_DATA_FILE),
            log_dir: base_dir.join(DEFAULT_LOG_DIR),
            log_level: default_log_level().to_string(),
            feature_set: FeatureSet::default(),
        }
    }

    /// Checks paths and normalizes the log level in place.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }
        if !self.log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(self.log_dir.clone()));
        }
        self.log_level = normalize_level(&self.log_level)
            .map_err(ConfigError::UnsupportedLogLevel)?
            .to_string();
        Ok(())
    }
}
