//! Load Strategies Use Case
//!
//! Populates the strategy picker. Best effort: any failure yields an empty
//! list so the host can still render the node's configuration.

use std::sync::Arc;

use serde_json::Value;

use crate::application::dto::OptionEntry;
use crate::application::errors::NodeError;
use crate::application::ports::{AlphaInsiderPort, CredentialsPort};
use crate::domain::shared::UserId;

/// Use case for loading the caller's strategies as options.
pub struct LoadStrategiesUseCase<A, C>
where
    A: AlphaInsiderPort,
    C: CredentialsPort,
{
    api: Arc<A>,
    credentials: Arc<C>,
}

impl<A, C> LoadStrategiesUseCase<A, C>
where
    A: AlphaInsiderPort,
    C: CredentialsPort,
{
    /// Create a new LoadStrategiesUseCase.
    pub const fn new(api: Arc<A>, credentials: Arc<C>) -> Self {
        Self { api, credentials }
    }

    /// Execute the use case. Never fails.
    pub async fn execute(&self) -> Vec<OptionEntry> {
        match self.load().await {
            Ok(options) => {
                tracing::debug!(count = options.len(), "Loaded strategy options");
                options
            }
            Err(error) => {
                tracing::warn!(error = %error, "Failed to load strategies, returning no options");
                Vec::new()
            }
        }
    }

    async fn load(&self) -> Result<Vec<OptionEntry>, NodeError> {
        let credentials = self.credentials.credentials().await?;

        let user_info = payload(self.api.get_user_info(&credentials).await?);
        let user_id = user_id(&user_info)?;

        let strategies = payload(
            self.api
                .get_user_strategies(&credentials, &user_id)
                .await?,
        );

        let Value::Array(strategies) = strategies else {
            return Err(NodeError::UnexpectedResponse {
                message: "expected an array of strategies".to_string(),
            });
        };

        Ok(strategies.iter().filter_map(strategy_option).collect())
    }
}

/// Unwrap the `{"success": ..., "response": ...}` envelope when present.
fn payload(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("success") && map.contains_key("response") => {
            map.remove("response").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn user_id(user_info: &Value) -> Result<UserId, NodeError> {
    let missing = || NodeError::UnexpectedResponse {
        message: "user info did not contain a user_id".to_string(),
    };

    let raw = match user_info.get("user_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(missing()),
    };

    UserId::parse(raw).map_err(|_| missing())
}

fn strategy_option(strategy: &Value) -> Option<OptionEntry> {
    let name = strategy.get("name")?.as_str()?;
    let strategy_id = match strategy.get("strategy_id")? {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    Some(OptionEntry::new(name, strategy_id))
}
