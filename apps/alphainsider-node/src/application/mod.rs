//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for the AlphaInsider API and the host's credential store
//! - **Use Cases**: Node execution, strategy option loading, credential testing
//! - **DTOs**: Input items, the operation union and output records

pub mod dto;
pub mod errors;
pub mod ports;
pub mod use_cases;

pub use dto::*;
pub use errors::{ItemError, NodeError};
pub use ports::*;
pub use use_cases::*;
