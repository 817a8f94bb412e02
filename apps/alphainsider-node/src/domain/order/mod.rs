//! Order Context
//!
//! Value objects for the two order shapes accepted by AlphaInsider:
//! a single webhook order and a batch of target allocations.

mod action;
mod allocation;
mod leverage;
mod request;

pub use action::{AllocationAction, OrderAction};
pub use allocation::{Allocation, Allocations};
pub use leverage::Leverage;
pub use request::{AllocationOrder, WebhookOrder};
