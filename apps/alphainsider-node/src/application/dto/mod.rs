//! Data Transfer Objects
//!
//! Shapes exchanged with the host: resolved item parameters in, output
//! records and option lists out.

mod items;
mod operation;

pub use items::{
    CredentialTestOutcome, CredentialTestStatus, ExecuteRequest, NodeParameters, OptionEntry,
    OutputRecord,
};
pub use operation::{CustomCall, Operation, OperationKind, params};
