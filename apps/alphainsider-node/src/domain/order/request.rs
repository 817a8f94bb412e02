//! Order requests.

use super::action::OrderAction;
use super::allocation::Allocations;
use super::leverage::Leverage;
use crate::domain::shared::{StockId, StrategyId};

/// Single order placed through the `newOrderWebhook` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookOrder {
    /// Strategy to trade in.
    pub strategy_id: StrategyId,
    /// Stock to trade.
    pub stock_id: StockId,
    /// Order action.
    pub action: OrderAction,
    /// Leverage, already truncated.
    pub leverage: Leverage,
}

impl WebhookOrder {
    /// Create a webhook order.
    #[must_use]
    pub const fn new(
        strategy_id: StrategyId,
        stock_id: StockId,
        action: OrderAction,
        leverage: Leverage,
    ) -> Self {
        Self {
            strategy_id,
            stock_id,
            action,
            leverage,
        }
    }
}

/// Rebalance placed through the `newOrderAllocations` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOrder {
    /// Strategy to rebalance.
    pub strategy_id: StrategyId,
    /// Leverage, already truncated.
    pub leverage: Leverage,
    /// Target allocations.
    pub allocations: Allocations,
}

impl AllocationOrder {
    /// Create an allocation order.
    #[must_use]
    pub const fn new(strategy_id: StrategyId, leverage: Leverage, allocations: Allocations) -> Self {
        Self {
            strategy_id,
            leverage,
            allocations,
        }
    }
}
