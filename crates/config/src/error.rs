//! Config errors

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadError { path: PathBuf, source: std::io::Error },

    #[error("Failed to write config file at {path}: {source}")]
    WriteError { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse config file at {path}: {source}")]
    ParseError { path: PathBuf, source: toml::de::Error },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Refused to save; holds every failed check, `;`-separated
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidOverride { name: String, value: String },

    #[error("Failed to create config directory at {path}: {source}")]
    DirectoryCreationError { path: PathBuf, source: std::io::Error },

    /// No home directory to derive the default config location from
    #[error("Could not determine config directory path: {reason}")]
    PathResolutionError { reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One failed field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted field path, e.g. `server.trusted_proxies[1]`
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(field: impl Into<String>, message: impl Into<String>, value: impl ToString) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        match &self.value {
            Some(value) => write!(f, " (got: {})", value),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}
