//! Library configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default audio extensions, in the order they are matched
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["mp3", "mp4", "m4a", "m4b"];

/// Location and scanning rules of the audiobook tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory containing one subdirectory per author
    pub root: PathBuf,

    /// Audio file extensions (case-insensitive, without dot)
    pub audio_extensions: Vec<String>,

    /// Follow symbolic links when walking book directories
    pub follow_symlinks: bool,

    /// Maximum directory depth below a book (0 = unlimited)
    pub max_scan_depth: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("audiobooks"),
            audio_extensions: DEFAULT_AUDIO_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            follow_symlinks: true,
            max_scan_depth: 0, // unlimited
        }
    }
}

impl LibraryConfig {
    /// Depth guard as an option, `None` meaning unlimited
    pub fn max_depth(&self) -> Option<usize> {
        match self.max_scan_depth {
            0 => None,
            depth => Some(depth as usize),
        }
    }
}

impl ConfigSection for LibraryConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = Vec::new();

        if self.root.as_os_str().is_empty() {
            results.push(Err(ValidationError::new("library.root", "must not be empty")));
        }

        if self.audio_extensions.is_empty() {
            results.push(Err(ValidationError::new(
                "library.audio_extensions",
                "must list at least one extension",
            )));
        }

        for (i, ext) in self.audio_extensions.iter().enumerate() {
            results.push(Validator::not_empty(
                ext.trim_start_matches('.'),
                &format!("library.audio_extensions[{}]", i),
            ));
        }

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "library"
    }
}
