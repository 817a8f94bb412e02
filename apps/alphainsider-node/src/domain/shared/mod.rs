//! Shared Domain Types
//!
//! Identifiers, credentials and errors shared by the order context.

pub mod credentials;
pub mod errors;
pub mod identifiers;

pub use credentials::ApiCredentials;
pub use errors::DomainError;
pub use identifiers::{StockId, StrategyId, UserId};
