//! Workflow Host Integration
//!
//! The pieces a workflow-automation host loads: the credential type, the
//! declarative node description, and the node facade that wires the use
//! cases together.

mod credentials;
mod description;
mod node;

pub use credentials::{
    AlphaInsiderApiCredential, AuthenticateDescription, CredentialDescription,
    CredentialTestRequest, TestRequest,
};
pub use description::{
    CollectionOption, CredentialReference, DisplayOptions, NodeDefaults, NodeDescription,
    OptionValue, PropertyDescription, PropertyOption, RequestDefaults,
};
pub use node::{AlphaInsiderNode, LOAD_STRATEGIES};
