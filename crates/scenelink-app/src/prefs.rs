//! Addon preferences
//!
//! Handles loading and saving the addon's TOML preferences file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Preference errors
#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Failed to read preferences file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse preferences file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Preferences directory not found")]
    NoConfigDir,
}

/// Main preferences struct
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Preferences {
    /// General settings
    pub general: GeneralPrefs,
    /// Statistics settings
    pub statistics: StatisticsPrefs,
    /// Local server settings
    pub server: ServerPrefs,
    /// Debug tooling settings
    pub debug: DebugPrefs,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralPrefs {
    /// User name shown to collaborators and used in statistics files
    pub user: String,
    /// Log level filter (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for GeneralPrefs {
    fn default() -> Self {
        Self {
            user: "anonymous".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Statistics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsPrefs {
    /// Persist statistics automatically during cleanup
    pub auto_save: bool,
    /// Directory for statistics files (None = per-user default)
    pub directory: Option<PathBuf>,
}

impl Default for StatisticsPrefs {
    fn default() -> Self {
        Self {
            auto_save: true,
            directory: None,
        }
    }
}

/// Local server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerPrefs {
    /// Program to launch for a local sync server
    pub program: String,
    /// Port the local server listens on
    pub port: u16,
}

impl Default for ServerPrefs {
    fn default() -> Self {
        Self {
            program: "scenelink-server".to_string(),
            port: 12800,
        }
    }
}

/// Debug tooling settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugPrefs {
    /// Register the debug panel and self-test operator
    pub enabled: bool,
}

impl Preferences {
    /// Resolved log level filter
    pub fn log_level(&self) -> LevelFilter {
        self.general.log_level.parse().unwrap_or(LevelFilter::Warn)
    }

    /// Resolved statistics directory
    pub fn statistics_directory(&self) -> PathBuf {
        self.statistics
            .directory
            .clone()
            .unwrap_or_else(default_statistics_dir)
    }

    /// Load preferences from a file, defaulting when it does not exist
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load preferences from the per-user default location
    pub fn load_default() -> Result<Self, PrefsError> {
        Self::load(&Self::default_path()?)
    }

    /// Save preferences to a file
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Per-user preferences file path
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        ProjectDirs::from("com", "scenelink", "scenelink")
            .map(|dirs| dirs.config_dir().join("preferences.toml"))
            .ok_or(PrefsError::NoConfigDir)
    }
}

/// Per-user default statistics directory
pub fn default_statistics_dir() -> PathBuf {
    ProjectDirs::from("com", "scenelink", "scenelink")
        .map(|dirs| dirs.data_local_dir().join("statistics"))
        .unwrap_or_else(|| std::env::temp_dir().join("scenelink-statistics"))
}
