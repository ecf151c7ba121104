//! Configuration management for keyloop.
//!
//! Handles loading and saving the TOML configuration file with cross-platform
//! paths, validation, and atomic write operations. Directories left unset in
//! the file resolve under the platform data and config directories.

use crate::{
    AppError, AppResult,
    config::{LicenseConfig, ListenerConfig, PlaybackConfig, SignalConfig, StorageConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

const CONFIG_FILE_NAME: &str = "config.toml";
const KEYBINDS_FILE_NAME: &str = "keybinds.json";
const SIGNALS_DIR_NAME: &str = "signals";
const SEQUENCES_DIR_NAME: &str = "saved_sequences";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Trigger channel settings.
    #[serde(default)]
    pub signals: SignalConfig,
    /// Playback timing.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Hotkey listener process.
    #[serde(default)]
    pub listener: ListenerConfig,
    /// Sequence library.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Startup gate.
    #[serde(default)]
    pub license: LicenseConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating the
    /// default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating the default file if missing.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!(config_path = ?path, "No config found, creating default");
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config = Self::parse(&contents)?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Parse and validate TOML text. Missing sections and fields take their
    /// defaults.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would make a loop spin or never tick.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let zero_field = [
            ("signals.poll_interval_ms", self.signals.poll_interval_ms),
            ("playback.slice_ms", self.playback.slice_ms),
            (
                "listener.config_check_interval_ms",
                self.listener.config_check_interval_ms,
            ),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);

        if let Some((field, _)) = zero_field {
            return Err(AppError::ConfigError {
                reason: format!("{} must be greater than zero", field),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Save configuration to `path` using the atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            fs::create_dir_all(parent)?;
            debug!(config_dir = ?parent, "Created config directory");
        }

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Directory holding trigger files and the pause marker.
    #[track_caller]
    pub fn signal_dir(&self) -> AppResult<PathBuf> {
        match &self.signals.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join(SIGNALS_DIR_NAME)),
        }
    }

    /// Keybind JSON file shared with the listener.
    #[track_caller]
    pub fn keybinds_path(&self) -> AppResult<PathBuf> {
        match &self.listener.keybinds_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.config_dir().join(KEYBINDS_FILE_NAME)),
        }
    }

    /// Directory of saved sequences.
    #[track_caller]
    pub fn sequences_dir(&self) -> AppResult<PathBuf> {
        match &self.storage.sequences_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join(SEQUENCES_DIR_NAME)),
        }
    }

    /// Default location of `config.toml`.
    #[track_caller]
    pub fn config_path() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "keyloop", "Keyloop").ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
