// crates/server/src/error.rs
//! Mapping of failures to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookcaster_feed::FeedError;
use bookcaster_library::LibraryError;
use log::{error, warn};
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Library(err) | Self::Feed(FeedError::Library(err)) => match err {
                LibraryError::NotFound(_) => StatusCode::NOT_FOUND,
                LibraryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                LibraryError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Feed(FeedError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            Self::Feed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, self.to_string()).into_response()
    }
}
