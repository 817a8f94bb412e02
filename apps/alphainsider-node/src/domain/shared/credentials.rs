//! AlphaInsider API credentials.

use super::errors::DomainError;

/// API key issued from the AlphaInsider developer settings page.
///
/// The key is opaque; it is only ever forwarded in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    api_key: String,
}

impl ApiCredentials {
    /// Create credentials, rejecting an empty key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DomainError::EmptyValue {
                field: "apiKey".to_string(),
            });
        }
        Ok(Self { api_key })
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
