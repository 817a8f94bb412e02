//! Item-level DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::application::errors::NodeError;

/// Parameters of one input item, already resolved by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeParameters(Map<String, Value>);

impl NodeParameters {
    /// Wrap a parameter map.
    #[must_use]
    pub const fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Build from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, NodeError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NodeError::invalid_parameter(
                "parameters",
                format!("expected a JSON object, got {}", json_type(&other)),
            )),
        }
    }

    /// Raw parameter value; JSON `null` counts as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Required string parameter. Numbers are accepted and rendered.
    pub fn string(&self, name: &str) -> Result<String, NodeError> {
        self.optional_string(name)?
            .ok_or_else(|| NodeError::invalid_parameter(name, "parameter is required"))
    }

    /// Optional string parameter. Numbers are accepted and rendered.
    pub fn optional_string(&self, name: &str) -> Result<Option<String>, NodeError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(NodeError::invalid_parameter(
                name,
                format!("expected a string, got {}", json_type(other)),
            )),
        }
    }

    /// Numeric parameter with a default. Numeric strings are accepted.
    pub fn number_or(&self, name: &str, default: f64) -> Result<f64, NodeError> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| NodeError::invalid_parameter(name, "number out of range")),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(default),
            Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
                NodeError::invalid_parameter(name, format!("expected a number, got '{s}'"))
            }),
            Some(other) => Err(NodeError::invalid_parameter(
                name,
                format!("expected a number, got {}", json_type(other)),
            )),
        }
    }

    /// Boolean parameter with a default. `"true"`/`"false"` strings are accepted.
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, NodeError> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(NodeError::invalid_parameter(
                    name,
                    format!("expected a boolean, got '{s}'"),
                )),
            },
            Some(other) => Err(NodeError::invalid_parameter(
                name,
                format!("expected a boolean, got {}", json_type(other)),
            )),
        }
    }
}

impl From<Map<String, Value>> for NodeParameters {
    fn from(values: Map<String, Value>) -> Self {
        Self(values)
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Batch handed to the node by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// One entry per input item.
    pub items: Vec<NodeParameters>,
    /// Record per-item failures instead of aborting the batch.
    #[serde(default)]
    pub continue_on_fail: bool,
}

impl ExecuteRequest {
    /// Create a request that aborts on the first failure.
    #[must_use]
    pub const fn new(items: Vec<NodeParameters>) -> Self {
        Self {
            items,
            continue_on_fail: false,
        }
    }

    /// Enable or disable continue-on-fail.
    #[must_use]
    pub const fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }
}

/// One output record, paired with the input item that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    /// Record payload.
    pub json: Value,
    /// Index of the originating input item.
    pub paired_item: usize,
}

impl OutputRecord {
    /// Record for a successful call. Non-object responses are wrapped in
    /// `{"data": ...}`.
    #[must_use]
    pub fn success(item_index: usize, response: Value) -> Self {
        let json = match response {
            Value::Object(_) => response,
            other => json!({ "data": other }),
        };
        Self {
            json,
            paired_item: item_index,
        }
    }

    /// Record for a failed item under continue-on-fail.
    #[must_use]
    pub fn failure(item_index: usize, error: &NodeError) -> Self {
        Self {
            json: json!({ "error": error.to_string() }),
            paired_item: item_index,
        }
    }

    /// Error message, if this is a failure record.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.json.get("error").and_then(Value::as_str)
    }
}

/// Entry of a dynamically loaded option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Label shown to the user.
    pub name: String,
    /// Value stored in the parameter.
    pub value: String,
}

impl OptionEntry {
    /// Create an option entry.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Status of a credential test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialTestStatus {
    /// The key was accepted.
    #[serde(rename = "OK")]
    Ok,
    /// The test request failed.
    Error,
}

/// Result of a credential test, in the shape hosts display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialTestOutcome {
    /// Outcome.
    pub status: CredentialTestStatus,
    /// Human-readable detail.
    pub message: String,
}

impl CredentialTestOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: CredentialTestStatus::Ok,
            message: "Connection successful".to_string(),
        }
    }

    /// Failed outcome.
    #[must_use]
    pub fn error(error: &NodeError) -> Self {
        Self {
            status: CredentialTestStatus::Error,
            message: error.to_string(),
        }
    }

    /// Whether the test passed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.status, CredentialTestStatus::Ok)
    }
}
