//! Order actions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// Action for a single webhook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    /// Buy (open or add to a long).
    Buy,
    /// Go long.
    Long,
    /// Sell (reduce a long).
    Sell,
    /// Go short.
    Short,
    /// Close the position.
    Close,
    /// Flatten the position.
    Flat,
}

impl OrderAction {
    /// All actions in display order.
    pub const ALL: [Self; 6] = [
        Self::Buy,
        Self::Long,
        Self::Sell,
        Self::Short,
        Self::Close,
        Self::Flat,
    ];

    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Long => "long",
            Self::Sell => "sell",
            Self::Short => "short",
            Self::Close => "close",
            Self::Flat => "flat",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Long => "Long",
            Self::Sell => "Sell",
            Self::Short => "Short",
            Self::Close => "Close",
            Self::Flat => "Flat",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s.trim())
            .ok_or_else(|| DomainError::invalid("action", format!("unknown action '{s}'")))
    }
}

/// Directional action for one allocation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationAction {
    /// Target a long position.
    Long,
    /// Target a short position.
    Short,
    /// Close the position.
    Close,
}

impl AllocationAction {
    /// All allocation actions in display order.
    pub const ALL: [Self; 3] = [Self::Long, Self::Short, Self::Close];

    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
            Self::Close => "close",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Long => "Long",
            Self::Short => "Short",
            Self::Close => "Close",
        }
    }
}

impl fmt::Display for AllocationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s.trim())
            .ok_or_else(|| {
                DomainError::invalid("action", format!("unknown allocation action '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("buy", OrderAction::Buy)]
    #[test_case("long", OrderAction::Long)]
    #[test_case("sell", OrderAction::Sell)]
    #[test_case("short", OrderAction::Short)]
    #[test_case("close", OrderAction::Close)]
    #[test_case("flat", OrderAction::Flat)]
    fn order_action_parses(input: &str, expected: OrderAction) {
        assert_eq!(input.parse::<OrderAction>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn order_action_rejects_unknown() {
        let err = "hold".parse::<OrderAction>().unwrap_err();
        assert!(err.to_string().contains("hold"));
    }

    #[test]
    fn allocation_action_rejects_single_order_only_values() {
        assert!("buy".parse::<AllocationAction>().is_err());
        assert!("flat".parse::<AllocationAction>().is_err());
        assert_eq!(
            "close".parse::<AllocationAction>().unwrap(),
            AllocationAction::Close
        );
    }

    #[test]
    fn order_action_serde() {
        let json = serde_json::to_string(&OrderAction::Short).unwrap();
        assert_eq!(json, "\"short\"");

        let parsed: AllocationAction = serde_json::from_str("\"long\"").unwrap();
        assert_eq!(parsed, AllocationAction::Long);
    }
}
