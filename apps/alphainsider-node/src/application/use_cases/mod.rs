//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod execute_node;
mod load_strategies;
mod test_credentials;

#[cfg(test)]
pub(crate) mod testing;

pub use execute_node::ExecuteNodeUseCase;
pub use load_strategies::LoadStrategiesUseCase;
pub use test_credentials::TestCredentialsUseCase;
