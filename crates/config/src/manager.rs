//! Configuration manager - main API for config operations

use crate::feed_config::parse_start_date;
use crate::persistence::ConfigPersistence;
use crate::validation::summarize;
use crate::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `library.root`
pub const ENV_LIBRARY_ROOT: &str = "BOOKCASTER_LIBRARY_ROOT";
/// Environment variable overriding `server.bind_address`
pub const ENV_BIND_ADDRESS: &str = "BOOKCASTER_SERVER_BIND_ADDRESS";
/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "BOOKCASTER_SERVER_PORT";
/// Environment variable overriding `feed.start_date`
pub const ENV_START_DATE: &str = "BOOKCASTER_FEED_START_DATE";

/// Main configuration manager
///
/// Owns the location of the config file and knows how to load it, layer
/// environment overrides on top and write a default file.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a config manager using the platform config directory
    ///
    /// - Linux: `~/.config/bookcaster/config.toml`
    /// - macOS: `~/Library/Application Support/bookcaster/config.toml`
    /// - Windows: `%APPDATA%\bookcaster\config.toml`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self::with_path(config_dir.join("config.toml")))
    }

    /// Creates a config manager for an explicit config file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        Self {
            persistence: ConfigPersistence::new(config_path.clone()),
            config_path,
        }
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "bookcaster")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the configuration from file, defaults when the file is missing
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration and applies `BOOKCASTER_*` environment overrides
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        if let Err(errors) = config.validate() {
            log::warn!("Config after env overrides: {}", summarize(&errors));
        }

        Ok(config)
    }

    /// Writes a default config file if one doesn't exist
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path.exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path.display()
            );
            return Ok(false);
        }

        self.persistence.save(&Config::default())?;
        log::info!("Generated default config at {}", self.config_path.display());
        Ok(true)
    }
}

/// Applies overrides read through `lookup` (the process environment in production).
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = lookup(ENV_LIBRARY_ROOT) {
        config.library.root = PathBuf::from(root);
    }

    if let Some(address) = lookup(ENV_BIND_ADDRESS) {
        config.server.bind_address = address;
    }

    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidOverride {
            name: ENV_PORT.to_string(),
            value: port.clone(),
        })?;
    }

    if let Some(date) = lookup(ENV_START_DATE) {
        config.feed.start_date =
            parse_start_date(&date).ok_or_else(|| ConfigError::InvalidOverride {
                name: ENV_START_DATE.to_string(),
                value: date.clone(),
            })?;
    }

    Ok(())
}
