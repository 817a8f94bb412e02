//! Domain Layer
//!
//! Order value objects and validation rules for the AlphaInsider connector.
//! Nothing in this layer performs I/O.

/// Shared value objects and domain errors.
pub mod shared;

/// Order requests, leverage and allocations.
pub mod order;
