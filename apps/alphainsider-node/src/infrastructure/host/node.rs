//! AlphaInsider node facade.

use std::sync::Arc;

use crate::application::dto::{CredentialTestOutcome, ExecuteRequest, OptionEntry, OutputRecord};
use crate::application::errors::{ItemError, NodeError};
use crate::application::ports::{AlphaInsiderPort, CredentialsPort};
use crate::application::use_cases::{
    ExecuteNodeUseCase, LoadStrategiesUseCase, TestCredentialsUseCase,
};

use super::credentials::{AlphaInsiderApiCredential, CredentialDescription};
use super::description::NodeDescription;

/// Load-options method backing the strategy picker.
pub const LOAD_STRATEGIES: &str = "getStrategies";

/// The node as seen by a workflow host.
pub struct AlphaInsiderNode<A, C>
where
    A: AlphaInsiderPort,
    C: CredentialsPort,
{
    base_url: String,
    credentials: Arc<C>,
    execute: ExecuteNodeUseCase<A, C>,
    load_strategies: LoadStrategiesUseCase<A, C>,
    test_credentials: TestCredentialsUseCase<A>,
}

impl<A, C> AlphaInsiderNode<A, C>
where
    A: AlphaInsiderPort,
    C: CredentialsPort,
{
    /// Wire the node to an API adapter and a credential store.
    pub fn new(api: Arc<A>, credentials: Arc<C>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            execute: ExecuteNodeUseCase::new(Arc::clone(&api), Arc::clone(&credentials)),
            load_strategies: LoadStrategiesUseCase::new(Arc::clone(&api), Arc::clone(&credentials)),
            test_credentials: TestCredentialsUseCase::new(api),
            credentials,
        }
    }

    /// Node description.
    #[must_use]
    pub fn description(&self) -> NodeDescription {
        NodeDescription::alpha_insider(&self.base_url)
    }

    /// Credential type description.
    #[must_use]
    pub fn credential(&self) -> CredentialDescription {
        AlphaInsiderApiCredential::describe(&self.base_url)
    }

    /// Resolve a load-options method. Unknown methods yield no options.
    pub async fn load_options(&self, method: &str) -> Vec<OptionEntry> {
        if method == LOAD_STRATEGIES {
            self.load_strategies.execute().await
        } else {
            tracing::warn!(method, "Unknown load options method");
            Vec::new()
        }
    }

    /// Run the credential test against the configured credentials.
    pub async fn test_credentials(&self) -> CredentialTestOutcome {
        match self.credentials.credentials().await {
            Ok(credentials) => self.test_credentials.execute(&credentials).await,
            Err(error) => CredentialTestOutcome::error(&NodeError::from(error)),
        }
    }

    /// Execute the node over a batch of items.
    pub async fn execute(&self, request: ExecuteRequest) -> Result<Vec<OutputRecord>, ItemError> {
        self.execute.execute(request).await
    }
}
