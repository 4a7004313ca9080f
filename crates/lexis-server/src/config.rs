//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, storage backend, database
//! path and the default log filter.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Where records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database at `database_path`
    #[default]
    Sqlite,
    /// Process memory; lost on shutdown
    Memory,
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Storage backend (default: sqlite)
    #[serde(default)]
    pub storage: StorageBackend,

    /// SQLite database path; `:memory:` for a throwaway database
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Log filter used when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

fn default_database_path() -> String {
    "lexis.db".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            storage: StorageBackend::default(),
            database_path: default_database_path(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check fields that serde defaults cannot guard
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage == StorageBackend::Sqlite && self.database_path.is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
