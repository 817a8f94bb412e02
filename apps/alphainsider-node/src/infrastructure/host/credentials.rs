//! AlphaInsider API credential type.

use std::collections::BTreeMap;

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::json;

use super::description::PropertyDescription;
use crate::domain::shared::ApiCredentials;
use crate::infrastructure::alphainsider::endpoints;

const API_KEY_HELP: &str = "You can generate an API key from the \
[developer settings](https://alphainsider.com/settings/developers) page. \
Set permission webhooks -> newOrderWebhook.";

/// Credential type for the AlphaInsider API: one masked API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaInsiderApiCredential;

impl AlphaInsiderApiCredential {
    /// Credential type name referenced by the node.
    pub const NAME: &'static str = "AlphaInsiderApi";
    /// Human-readable name.
    pub const DISPLAY_NAME: &'static str = "AlphaInsider API";
    /// Where users learn how to create a key.
    pub const DOCUMENTATION_URL: &'static str =
        "https://api.alphainsider.com/resources/webhooks/neworderwebhook";
    /// Name of the API key property.
    pub const API_KEY: &'static str = "apiKey";

    /// Inject the credential headers into a request.
    ///
    /// The key is sent verbatim as the `Authorization` header value.
    pub fn authenticate(request: RequestBuilder, credentials: &ApiCredentials) -> RequestBuilder {
        request
            .header(AUTHORIZATION, credentials.api_key())
            .header(CONTENT_TYPE, "application/json")
    }

    /// Declarative description for the host.
    #[must_use]
    pub fn describe(base_url: &str) -> CredentialDescription {
        let api_key = PropertyDescription::new("API Key", Self::API_KEY, "string", json!(""))
            .with_type_options(json!({ "password": true }))
            .with_description(API_KEY_HELP);

        let headers = BTreeMap::from([
            (
                "Authorization".to_string(),
                format!("={{{{$credentials.{}}}}}", Self::API_KEY),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]);

        CredentialDescription {
            name: Self::NAME.to_string(),
            display_name: Self::DISPLAY_NAME.to_string(),
            documentation_url: Self::DOCUMENTATION_URL.to_string(),
            properties: vec![api_key],
            authenticate: AuthenticateDescription {
                kind: "generic".to_string(),
                headers,
            },
            test: CredentialTestRequest {
                request: TestRequest {
                    method: "GET".to_string(),
                    base_url: base_url.to_string(),
                    url: endpoints::GET_USER_INFO.to_string(),
                },
            },
        }
    }
}

/// Serialised credential type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescription {
    /// Type name.
    pub name: String,
    /// Display name.
    pub display_name: String,
    /// Documentation link.
    pub documentation_url: String,
    /// Credential fields.
    pub properties: Vec<PropertyDescription>,
    /// Header injection.
    pub authenticate: AuthenticateDescription,
    /// Connectivity test.
    pub test: CredentialTestRequest,
}

/// Generic header authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateDescription {
    /// Always `generic`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Header templates.
    pub headers: BTreeMap<String, String>,
}

/// Credential test wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialTestRequest {
    /// The request to issue.
    pub request: TestRequest,
}

/// Credential test request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    /// HTTP method.
    pub method: String,
    /// Base URL.
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Path relative to the base URL.
    pub url: String,
}
