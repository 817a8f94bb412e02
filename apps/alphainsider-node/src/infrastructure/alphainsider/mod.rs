//! AlphaInsider REST Adapter
//!
//! Implementation of `AlphaInsiderPort` over the AlphaInsider HTTP API:
//! - `Authorization: <apiKey>` header injection
//! - JSON request/response handling
//! - Status and transport errors mapped to `ApiError`
//!
//! Requests are sent once; there is no retry or rate limiting.

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::AlphaInsiderAdapter;
pub use api_types::endpoints;
pub use config::{AlphaInsiderConfig, DEFAULT_BASE_URL};
pub use error::AlphaInsiderError;
pub use http_client::AlphaInsiderHttpClient;
