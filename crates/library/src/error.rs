// FILE: crates/library/src/error.rs

use bookcaster_media_formats::FormatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Maps a failed stat of `what` to `NotFound` when the entry is missing
    pub(crate) fn from_stat(what: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(what)
        } else {
            Self::Io(err)
        }
    }
}

impl From<FormatError> for LibraryError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::FileNotFound { path } => Self::NotFound(path.display().to_string()),
            FormatError::ReadError { .. } => Self::Io(std::io::Error::other(err.to_string())),
        }
    }
}

// Both type aliases for convenience
pub type Result<T> = std::result::Result<T, LibraryError>;
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
