//! AlphaInsider Port (Driven Port)
//!
//! Interface for the AlphaInsider REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::order::{AllocationOrder, WebhookOrder};
use crate::domain::shared::{ApiCredentials, UserId};

/// HTTP method accepted by the custom API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET request.
    #[default]
    Get,
    /// POST request.
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass-through request for arbitrary AlphaInsider endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the API base URL.
    pub endpoint: String,
    /// Query string parameters.
    pub query: Option<Map<String, Value>>,
    /// JSON body (POST only).
    pub body: Option<Value>,
}

impl CustomRequest {
    /// Create a bare request with no query and no body.
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: None,
            body: None,
        }
    }

    /// Attach query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Map<String, Value>) -> Self {
        self.query = Some(query);
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// AlphaInsider port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("AlphaInsider connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Remote service answered with a non-success status.
    #[error("AlphaInsider API error ({status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Invalid response from AlphaInsider: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },

    /// Request could not be built.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error details.
        message: String,
    },
}

/// Port for AlphaInsider API interactions.
///
/// Responses are returned as raw JSON; shaping is the caller's concern.
#[async_trait]
pub trait AlphaInsiderPort: Send + Sync {
    /// `GET /getUserInfo`.
    async fn get_user_info(&self, credentials: &ApiCredentials) -> Result<Value, ApiError>;

    /// `GET /getUserStrategies?user_id=<id>`.
    async fn get_user_strategies(
        &self,
        credentials: &ApiCredentials,
        user_id: &UserId,
    ) -> Result<Value, ApiError>;

    /// `POST /newOrderWebhook`.
    async fn new_order_webhook(
        &self,
        credentials: &ApiCredentials,
        order: &WebhookOrder,
    ) -> Result<Value, ApiError>;

    /// `POST /newOrderAllocations`.
    async fn new_order_allocations(
        &self,
        credentials: &ApiCredentials,
        order: &AllocationOrder,
    ) -> Result<Value, ApiError>;

    /// Arbitrary call; the `Authorization` header is only sent when
    /// credentials are supplied.
    async fn custom_call(
        &self,
        request: &CustomRequest,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_method_serde() {
        let parsed: HttpMethod = serde_json::from_str("\"POST\"").unwrap();
        assert_eq!(parsed, HttpMethod::Post);
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn custom_request_builder() {
        let mut query = Map::new();
        query.insert("user_id".to_string(), json!("42"));

        let request = CustomRequest::new(HttpMethod::Post, "/getStrategy")
            .with_query(query.clone())
            .with_body(json!({"strategy_id": "s1"}));

        assert_eq!(request.endpoint, "/getStrategy");
        assert_eq!(request.query, Some(query));
        assert_eq!(request.body, Some(json!({"strategy_id": "s1"})));
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = ApiError::Http {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "AlphaInsider API error (401): Invalid API key");
    }
}
