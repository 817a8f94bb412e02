//! Infrastructure Layer
//!
//! Adapters for the AlphaInsider REST API, the workflow host integration,
//! configuration and logging.

pub mod alphainsider;
pub mod config;
pub mod host;
pub mod telemetry;
