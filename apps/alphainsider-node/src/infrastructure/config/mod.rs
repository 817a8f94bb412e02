//! Configuration Module
//!
//! Settings for the command-line host, loaded from environment variables.

mod settings;

pub use settings::{
    API_KEY_VAR, BASE_URL_VAR, ConfigError, NodeSettings, TIMEOUT_SECS_VAR,
};
