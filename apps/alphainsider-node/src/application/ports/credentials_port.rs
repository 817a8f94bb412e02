//! Credentials Port (Driven Port)
//!
//! The host owns the secret store; the node only reads the API key once per
//! item.

use async_trait::async_trait;

use crate::domain::shared::ApiCredentials;

/// Credential lookup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    /// No credential is configured for the node.
    #[error("No AlphaInsider API credentials configured")]
    Missing,
}

/// Port for the host's credential store.
#[async_trait]
pub trait CredentialsPort: Send + Sync {
    /// Fetch the credential bound to the node.
    async fn credentials(&self) -> Result<ApiCredentials, CredentialsError>;
}

/// Credential store holding a single, possibly absent, API key.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    credentials: Option<ApiCredentials>,
}

impl StaticCredentials {
    /// Store holding the given credentials.
    #[must_use]
    pub const fn new(credentials: ApiCredentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    /// Store holding whatever the host has configured.
    #[must_use]
    pub const fn from_option(credentials: Option<ApiCredentials>) -> Self {
        Self { credentials }
    }

    /// Store with nothing configured.
    #[must_use]
    pub const fn empty() -> Self {
        Self { credentials: None }
    }
}

#[async_trait]
impl CredentialsPort for StaticCredentials {
    async fn credentials(&self) -> Result<ApiCredentials, CredentialsError> {
        self.credentials.clone().ok_or(CredentialsError::Missing)
    }
}
