//! AlphaInsider adapter configuration.

use std::time::Duration;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://alphainsider.com/api";

/// Default HTTP request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the AlphaInsider adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaInsiderConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for AlphaInsiderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AlphaInsiderConfig {
    /// Create a configuration pointing at the production API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base URL (tests, staging).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
