//! HTTP client wrapper for the AlphaInsider API.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};

use super::api_types::ErrorResponse;
use super::config::AlphaInsiderConfig;
use super::error::AlphaInsiderError;
use crate::domain::shared::ApiCredentials;
use crate::infrastructure::host::AlphaInsiderApiCredential;

/// HTTP client for the AlphaInsider API.
#[derive(Debug, Clone)]
pub struct AlphaInsiderHttpClient {
    client: Client,
    base_url: String,
}

impl AlphaInsiderHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &AlphaInsiderConfig) -> Result<Self, AlphaInsiderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AlphaInsiderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an endpoint against the base URL. Every request stays under it.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Make a GET request.
    pub async fn get(
        &self,
        endpoint: &str,
        query: Option<&Map<String, Value>>,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, AlphaInsiderError> {
        self.request(Method::GET, endpoint, query, None::<&()>, credentials)
            .await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        query: Option<&Map<String, Value>>,
        body: Option<&B>,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, AlphaInsiderError> {
        self.request(Method::POST, endpoint, query, body, credentials)
            .await
    }

    async fn request<B: Serialize + Sync>(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Map<String, Value>>,
        body: Option<&B>,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, AlphaInsiderError> {
        let url = self.url(endpoint);

        let mut request: RequestBuilder = self.client.request(method.clone(), &url);
        if let Some(query) = query {
            request = request.query(&query_pairs(query));
        }
        // Headers first so `json` does not add a second Content-Type.
        if let Some(credentials) = credentials {
            request = AlphaInsiderApiCredential::authenticate(request, credentials);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, url = %url, "Sending AlphaInsider request");

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            tracing::debug!(status = status.as_u16(), url = %url, "AlphaInsider request succeeded");
            return Ok(parse_body(&text));
        }

        let message = error_message(status, &text);
        tracing::warn!(
            status = status.as_u16(),
            url = %url,
            message = %message,
            "AlphaInsider request failed"
        );

        Err(AlphaInsiderError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Flatten query parameters to strings; nested values are sent as JSON.
fn query_pairs(query: &Map<String, Value>) -> Vec<(String, String)> {
    query
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Empty bodies become `null`; non-JSON bodies are returned as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::into_message)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}
