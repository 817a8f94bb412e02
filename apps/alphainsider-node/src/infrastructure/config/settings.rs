//! Node Settings
//!
//! Environment-driven settings for the command-line host.
//!
//! # Environment Variables
//!
//! - `ALPHAINSIDER_API_KEY`: API key (required for authenticated commands)
//! - `ALPHAINSIDER_BASE_URL`: API base URL (default: https://alphainsider.com/api)
//! - `ALPHAINSIDER_TIMEOUT_SECS`: request timeout in seconds (default: 30)

use std::time::Duration;

use crate::domain::shared::ApiCredentials;
use crate::infrastructure::alphainsider::AlphaInsiderConfig;

/// API key variable.
pub const API_KEY_VAR: &str = "ALPHAINSIDER_API_KEY";
/// Base URL variable.
pub const BASE_URL_VAR: &str = "ALPHAINSIDER_BASE_URL";
/// Request timeout variable.
pub const TIMEOUT_SECS_VAR: &str = "ALPHAINSIDER_TIMEOUT_SECS";

/// Settings for running the node outside a workflow host.
#[derive(Debug, Clone)]
pub struct NodeSettings {
    /// HTTP client settings.
    pub api: AlphaInsiderConfig,
    /// API key, when configured.
    pub credentials: Option<ApiCredentials>,
}

impl NodeSettings {
    /// Create settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AlphaInsiderConfig::default();

        let base_url = match lookup(BASE_URL_VAR) {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::EmptyValue(BASE_URL_VAR.to_string()));
            }
            Some(url) if !is_http_url(url.trim()) => {
                return Err(ConfigError::InvalidValue {
                    key: BASE_URL_VAR.to_string(),
                    message: format!("expected an http(s) URL, got '{url}'"),
                });
            }
            Some(url) => url.trim().to_string(),
            None => defaults.base_url,
        };

        let timeout = parse_duration_secs(&lookup, TIMEOUT_SECS_VAR, defaults.timeout)?;

        let credentials = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .map(ApiCredentials::new)
            .transpose()
            .map_err(|e| ConfigError::InvalidValue {
                key: API_KEY_VAR.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            api: AlphaInsiderConfig::new()
                .with_base_url(base_url)
                .with_timeout(timeout),
            credentials,
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable could not be parsed.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// What was wrong.
        message: String,
    },
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn parse_duration_secs<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a positive number of seconds, got '{raw}'"),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}
