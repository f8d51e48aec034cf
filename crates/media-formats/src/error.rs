//! Error types for media format operations

use std::path::PathBuf;

/// Result type for format operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while sniffing a file
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// File not found or inaccessible
    FileNotFound { path: PathBuf },
    /// Failed to read file
    ReadError { path: PathBuf, reason: String },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::ReadError { path, reason } => {
                write!(f, "Failed to read file {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for FormatError {}

impl FormatError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn read_error(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::ReadError {
            path,
            reason: reason.into(),
        }
    }

    /// Maps an I/O failure on `path` to the matching variant
    pub fn from_io(path: PathBuf, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            _ => Self::read_error(path, err.to_string()),
        }
    }
}
