//! Configuration management
//!
//! This module handles loading and parsing configuration for the kitchen
//! nerd client. Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session store configuration
    #[serde(default)]
    pub session: SessionStoreConfig,
    /// Recipe list configuration
    #[serde(default)]
    pub list: ListConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            session: SessionStoreConfig::default(),
            list: ListConfig::default(),
        }
    }
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the kitchen nerd backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8088".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStoreConfig {
    /// Store driver (file or memory)
    #[serde(default)]
    pub driver: StoreDriver,
    /// Directory holding the stored session file
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            driver: StoreDriver::default(),
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("data")
}

/// Session store driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreDriver {
    /// JSON file in the configured directory (default)
    #[default]
    File,
    /// In-memory store, forgotten on exit
    Memory,
}

/// Recipe list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Number of recipes requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        // Handle empty file - return defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - KITCHEN_NERD_BACKEND_URL
    /// - KITCHEN_NERD_BACKEND_TIMEOUT_SECONDS
    /// - KITCHEN_NERD_SESSION_DRIVER
    /// - KITCHEN_NERD_SESSION_PATH
    /// - KITCHEN_NERD_LIST_PAGE_SIZE
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("KITCHEN_NERD_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(timeout) = std::env::var("KITCHEN_NERD_BACKEND_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.backend.timeout_seconds = timeout;
            }
        }
        if let Ok(driver) = std::env::var("KITCHEN_NERD_SESSION_DRIVER") {
            match driver.to_lowercase().as_str() {
                "file" => self.session.driver = StoreDriver::File,
                "memory" => self.session.driver = StoreDriver::Memory,
                _ => {} // Ignore invalid values
            }
        }
        if let Ok(path) = std::env::var("KITCHEN_NERD_SESSION_PATH") {
            self.session.path = PathBuf::from(path);
        }
        if let Ok(size) = std::env::var("KITCHEN_NERD_LIST_PAGE_SIZE") {
            if let Ok(size) = size.parse::<u64>() {
                self.list.page_size = size;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
