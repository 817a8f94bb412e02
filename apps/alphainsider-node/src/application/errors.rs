//! Application errors.

use thiserror::Error;

use super::ports::{ApiError, CredentialsError};
use crate::domain::shared::DomainError;

/// Errors raised while resolving or executing one node item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    /// Credentials could not be obtained from the host.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// Parameter missing or of the wrong type.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// User-supplied JSON did not parse.
    #[error("Invalid JSON in '{parameter}': {message}")]
    JsonParse {
        /// Parameter name.
        parameter: String,
        /// Parser message.
        message: String,
    },

    /// Parameter parsed but is not an array.
    #[error("{parameter} must be a JSON array")]
    NotAnArray {
        /// Parameter name.
        parameter: String,
    },

    /// Operation discriminant not recognised.
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// Order value rejected by domain validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Remote response did not have the expected shape.
    #[error("Unexpected AlphaInsider response: {message}")]
    UnexpectedResponse {
        /// Error details.
        message: String,
    },
}

impl NodeError {
    /// Shorthand for [`NodeError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for [`NodeError::JsonParse`].
    pub fn json_parse(parameter: &str, source: &serde_json::Error) -> Self {
        Self::JsonParse {
            parameter: parameter.to_string(),
            message: source.to_string(),
        }
    }

    /// Whether the error was raised before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Api(_) | Self::UnexpectedResponse { .. })
    }
}

/// Error that aborted a batch, tagged with the failing item.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Item {item_index} failed: {source}")]
pub struct ItemError {
    /// Index of the failing input item.
    pub item_index: usize,
    /// Underlying error.
    #[source]
    pub source: NodeError,
}
