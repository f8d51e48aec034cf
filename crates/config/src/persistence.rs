//! Reading and writing the config file

use crate::validation::summarize;
use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Loads and stores one TOML config file
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Reads the config file
    ///
    /// A missing file yields defaults. A blank or malformed file is an error;
    /// validation problems are only logged.
    pub fn load(&self) -> ConfigResult<Config> {
        let path = &self.config_path;
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => return Err(ConfigError::ReadError { path: path.clone(), source }),
        };

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, "config file is blank"),
            });
        }

        let config: Config = toml::from_str(&contents)
            .map_err(|source| ConfigError::ParseError { path: path.clone(), source })?;

        if let Err(errors) = config.validate() {
            log::warn!("{}: {}", path.display(), summarize(&errors));
        }

        Ok(config)
    }

    /// Validates `config` and replaces the file with it in one rename
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError(summarize(&errors)))?;

        let dir = match self.config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| ConfigError::DirectoryCreationError {
            path: dir.clone(),
            source,
        })?;

        let contents = toml::to_string_pretty(config)?;
        let mut staged = NamedTempFile::new_in(&dir)?;
        staged.write_all(contents.as_bytes())?;
        staged
            .persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        log::info!("Wrote config to {}", self.config_path.display());
        Ok(())
    }
}
