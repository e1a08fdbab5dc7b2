//! Persisted quiz settings.
//!
//! Stored as JSON in `<config_dir>/flag-quiz/config.json`. Missing or broken
//! files fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::LogLevel;

const APP_DIR: &str = "flag-quiz";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_QUESTIONS: usize = 10;
pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 900;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub questions_per_round: usize,
    pub auto_advance_ms: u64,
    pub log_level: LogLevel,
    pub catalog_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_per_round: DEFAULT_QUESTIONS,
            auto_advance_ms: DEFAULT_AUTO_ADVANCE_MS,
            log_level: LogLevel::Info,
            catalog_path: None,
        }
    }
}

/// Path of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load settings, using defaults for anything missing or unreadable.
pub fn load() -> QuizConfig {
    let Some(path) = config_path() else {
        debug!("No config directory, using defaults");
        return QuizConfig::default();
    };
    match load_from(&path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            debug!(path = %path.display(), "No config file, using defaults");
            QuizConfig::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config, using defaults");
            QuizConfig::default()
        }
    }
}

/// Read settings from `path`. `Ok(None)` when the file does not exist.
pub fn load_from(path: &Path) -> Result<Option<QuizConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

/// Persist settings to the default location.
pub fn save(config: &QuizConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    info!(path = %path.display(), "Config saved");
    Ok(path)
}

pub fn save_to(config: &QuizConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}
