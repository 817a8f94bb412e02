//! Application Ports (Driven)
//!
//! - `AlphaInsiderPort`: the remote REST API
//! - `CredentialsPort`: the host's secret store

mod alphainsider_port;
mod credentials_port;

pub use alphainsider_port::{AlphaInsiderPort, ApiError, CustomRequest, HttpMethod};
pub use credentials_port::{CredentialsError, CredentialsPort, StaticCredentials};
