//! AlphaInsider-specific error types.

use thiserror::Error;

use crate::application::ports::ApiError;

/// Errors from the AlphaInsider adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlphaInsiderError {
    /// API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// Transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON encoding or decoding failed.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// HTTP client could not be built.
    #[error("Client configuration error: {0}")]
    Client(String),
}

impl From<AlphaInsiderError> for ApiError {
    fn from(err: AlphaInsiderError) -> Self {
        match err {
            AlphaInsiderError::Http { status, message } => Self::Http { status, message },
            AlphaInsiderError::Network(message) => Self::ConnectionError { message },
            AlphaInsiderError::JsonParse(message) => Self::InvalidResponse { message },
            AlphaInsiderError::Client(message) => Self::InvalidRequest { message },
        }
    }
}

impl From<reqwest::Error> for AlphaInsiderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::JsonParse(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
