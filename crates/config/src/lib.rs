//! Bookcaster configuration
//!
//! Every component receives its settings explicitly from a [`Config`] value;
//! nothing reads process state after startup.
//!
//! # Example
//!
//! ```rust
//! use bookcaster_config::Config;
//!
//! let config: Config = toml::from_str(r#"
//! [library]
//! root = "/srv/audiobooks"
//!
//! [feed]
//! start_date = "2020-01-10 00:00:00"
//! "#).expect("valid config");
//!
//! assert_eq!(config.server.port, 8080);
//! assert_eq!(config.library.audio_extensions, vec!["mp3", "mp4", "m4a", "m4b"]);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
mod feed_config;
mod library_config;
mod server_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{
    apply_env_overrides, ConfigManager, ENV_BIND_ADDRESS, ENV_LIBRARY_ROOT, ENV_PORT,
    ENV_START_DATE,
};
pub use validation::{ConfigSection, Validator};

pub use feed_config::{default_start_date, parse_start_date, FeedConfig};
pub use library_config::{LibraryConfig, DEFAULT_AUDIO_EXTENSIONS};
pub use server_config::ServerConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// HTTP listener settings
    pub server: ServerConfig,

    /// Audiobook tree location and scanning rules
    pub library: LibraryConfig,

    /// Podcast feed settings
    pub feed: FeedConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        collect_section(&self.server, &mut errors);
        collect_section(&self.library, &mut errors);
        collect_section(&self.feed, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn collect_section<S: ConfigSection>(section: &S, errors: &mut Vec<ValidationError>) {
    if let Err(mut e) = section.validate() {
        log::debug!(
            "{} error(s) in [{}] section",
            e.len(),
            section.section_name()
        );
        errors.append(&mut e);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: ServerConfig::default(),
            library: LibraryConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}
