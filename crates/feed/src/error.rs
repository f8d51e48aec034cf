// crates/feed/src/error.rs
//! Error types for feed generation

use bookcaster_library::LibraryError;
use bookcaster_media_formats::FormatError;
use thiserror::Error;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while building or writing a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// XML writing failed
    #[error("XML writing error: {0}")]
    Xml(String),

    /// Publication date could not be computed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Track lookup or type resolution failed
    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        FeedError::Xml(err.to_string())
    }
}

impl From<FormatError> for FeedError {
    fn from(err: FormatError) -> Self {
        FeedError::Library(err.into())
    }
}

impl From<url::ParseError> for FeedError {
    fn from(err: url::ParseError) -> Self {
        FeedError::InvalidUrl(err.to_string())
    }
}
