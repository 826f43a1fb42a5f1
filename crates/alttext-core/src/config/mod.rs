//! Configuration management for alttext.
//!
//! Configuration is loaded from a TOML file with sensible defaults. Every
//! section implements `Default`, so an empty or missing file is valid.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Upload limits
    pub limits: LimitsConfig,

    /// Credentials file settings
    pub env: EnvConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Provider endpoint settings
    pub providers: ProvidersConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.alttext.alttext/config.toml
    /// - Linux: ~/.config/alttext/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\alttext\config\config.toml
    ///
    /// Falls back to ~/.alttext/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "alttext", "alttext")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".alttext").join("config.toml")
            })
    }

    /// Get the resolved env file path (with ~ expansion).
    pub fn env_file(&self) -> PathBuf {
        let path_str = self.env.file.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
