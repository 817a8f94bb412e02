//! AlphaInsider API request and response types.
//!
//! These types map directly to AlphaInsider's REST API format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::order::{AllocationOrder, OrderAction, WebhookOrder};

/// Endpoint paths relative to the API base URL.
pub mod endpoints {
    /// Current user's profile.
    pub const GET_USER_INFO: &str = "/getUserInfo";
    /// Strategies owned by a user.
    pub const GET_USER_STRATEGIES: &str = "/getUserStrategies";
    /// Single order.
    pub const NEW_ORDER_WEBHOOK: &str = "/newOrderWebhook";
    /// Allocation rebalance.
    pub const NEW_ORDER_ALLOCATIONS: &str = "/newOrderAllocations";
}

// ============================================================================
// Order Request Types
// ============================================================================

/// Body of `POST /newOrderWebhook`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderWebhookRequest<'a> {
    /// Strategy ID.
    pub strategy_id: &'a str,
    /// Stock ID.
    pub stock_id: &'a str,
    /// Order action.
    pub action: OrderAction,
    /// Leverage, two decimal places.
    pub leverage: f64,
}

impl<'a> From<&'a WebhookOrder> for NewOrderWebhookRequest<'a> {
    fn from(order: &'a WebhookOrder) -> Self {
        Self {
            strategy_id: order.strategy_id.as_str(),
            stock_id: order.stock_id.as_str(),
            action: order.action,
            leverage: order.leverage.as_f64(),
        }
    }
}

/// Body of `POST /newOrderAllocations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderAllocationsRequest<'a> {
    /// Strategy ID.
    pub strategy_id: &'a str,
    /// Leverage, two decimal places.
    pub leverage: f64,
    /// Allocations exactly as supplied.
    pub allocations: &'a [Value],
}

impl<'a> From<&'a AllocationOrder> for NewOrderAllocationsRequest<'a> {
    fn from(order: &'a AllocationOrder) -> Self {
        Self {
            strategy_id: order.strategy_id.as_str(),
            leverage: order.leverage.as_f64(),
            allocations: order.allocations.values(),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Error body returned by AlphaInsider.
///
/// The service reports failures as `{"success": false, "response": "..."}`;
/// `message` and `error` are accepted for gateway-level errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    /// Envelope payload.
    #[serde(default)]
    pub response: Option<Value>,
    /// Generic message field.
    #[serde(default)]
    pub message: Option<String>,
    /// Generic error field.
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Best human-readable message in the body.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        match self.response {
            Some(Value::String(message)) => return Some(message),
            Some(Value::Object(map)) => {
                if let Some(Value::String(message)) = map.get("message") {
                    return Some(message.clone());
                }
            }
            _ => {}
        }
        self.message.or(self.error)
    }
}
