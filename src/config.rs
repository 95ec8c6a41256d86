//! Configuration file handling.
//!
//! This module provides loading and saving of wpguard configuration from a
//! TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/wpguard/config.toml`
//! - macOS: `~/Library/Application Support/wpguard/config.toml`
//! - Windows: `%APPDATA%\wpguard\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! user_agent = "wpguard/0.1"
//! default_format = "table"
//! api_key = "wrm-site-key"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// Loaded from a TOML file, or created with default values when the file
/// doesn't exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// User agent sent by the HTTP probes.
    pub user_agent: String,

    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json"
    pub default_format: String,

    /// Remote-management API key used when no `--api-key` flag is
    /// provided. Without one, the vulnerability probe skips the update
    /// inventory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: format!("wpguard/{}", env!("CARGO_PKG_VERSION")),
            default_format: "table".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file, creating the parent
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wpguard")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.user_agent.starts_with("wpguard/"));
        assert_eq!(config.default_format, "table");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_parses_partial_file() {
        let config: Config = toml::from_str("api_key = \"wrm-key\"").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("wrm-key"));
        assert_eq!(config.default_format, "table");
    }

    #[test]
    fn test_config_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.default_format, "table");
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.api_key = Some("secret".to_string());
        config.default_format = "json".to_string();
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.default_format, "json");
    }

    #[test]
    fn test_generate_default_config_is_parseable() {
        let rendered = Config::generate_default_config();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.default_format, "table");
    }
}
