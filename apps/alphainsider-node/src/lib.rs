// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! AlphaInsider Node - Workflow Connector Library
//!
//! Places orders on AlphaInsider strategies from a workflow-automation host.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Order value objects
//!   - `order`: actions, leverage truncation, allocations, order requests
//!   - `shared`: identifiers, API credentials, domain errors
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `AlphaInsiderPort`, `CredentialsPort`
//!   - `use_cases`: `ExecuteNode`, `LoadStrategies`, `TestCredentials`
//!   - `dto`: node parameters, the `Operation` tagged union, output records
//!
//! - **Infrastructure**: Adapters
//!   - `alphainsider`: reqwest adapter for the REST API
//!   - `host`: credential type, node description, node facade
//!   - `config`: environment settings
//!   - `telemetry`: tracing subscriber

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

pub use domain::order::{
    Allocation, AllocationAction, AllocationOrder, Allocations, Leverage, OrderAction,
    WebhookOrder,
};
pub use domain::shared::{ApiCredentials, DomainError, StockId, StrategyId, UserId};

pub use application::dto::{
    CredentialTestOutcome, CredentialTestStatus, ExecuteRequest, NodeParameters, OptionEntry,
    Operation, OperationKind, OutputRecord,
};
pub use application::errors::{ItemError, NodeError};
pub use application::ports::{
    AlphaInsiderPort, ApiError, CredentialsError, CredentialsPort, CustomRequest, HttpMethod,
    StaticCredentials,
};

pub use infrastructure::alphainsider::{AlphaInsiderAdapter, AlphaInsiderConfig};
pub use infrastructure::config::{ConfigError, NodeSettings};
pub use infrastructure::host::{AlphaInsiderApiCredential, AlphaInsiderNode, NodeDescription};
