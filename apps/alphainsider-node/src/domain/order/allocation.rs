//! Target allocations for `newOrderAllocations`.
//!
//! Entries are validated field by field, but the original JSON values are the
//! ones transmitted so the remote service sees exactly what the user supplied.

use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use super::action::AllocationAction;
use crate::domain::shared::{DomainError, StockId};

/// One validated allocation entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Stock to allocate.
    pub stock_id: StockId,
    /// Directional action.
    pub action: AllocationAction,
    /// Fraction of strategy buying power, in `[0, 1]`.
    pub percent: f64,
}

#[derive(Deserialize)]
struct RawAllocation {
    stock_id: String,
    action: String,
    percent: f64,
}

impl Allocation {
    /// Lowest accepted percent.
    pub const MIN_PERCENT: f64 = 0.0;

    /// Highest accepted percent.
    pub const MAX_PERCENT: f64 = 1.0;

    /// Validate the entry at `index` of an allocations array.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, DomainError> {
        let field = format!("allocations[{index}]");
        let raw: RawAllocation = serde_json::from_value(value.clone())
            .map_err(|e| DomainError::invalid(&field, e.to_string()))?;

        let stock_id = StockId::parse(raw.stock_id).map_err(|_| DomainError::EmptyValue {
            field: format!("{field}.stock_id"),
        })?;
        let action = AllocationAction::from_str(&raw.action)
            .map_err(|e| DomainError::invalid(&format!("{field}.action"), e.to_string()))?;

        if !(Self::MIN_PERCENT..=Self::MAX_PERCENT).contains(&raw.percent) {
            return Err(DomainError::OutOfRange {
                field: format!("{field}.percent"),
                value: raw.percent.to_string(),
                min: Self::MIN_PERCENT.to_string(),
                max: Self::MAX_PERCENT.to_string(),
            });
        }

        Ok(Self {
            stock_id,
            action,
            percent: raw.percent,
        })
    }
}

/// Validated allocation list, keeping the user-supplied JSON for transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocations {
    entries: Vec<Allocation>,
    values: Vec<Value>,
}

impl Allocations {
    /// Validate every entry of an allocations array.
    pub fn from_values(values: Vec<Value>) -> Result<Self, DomainError> {
        let entries = values
            .iter()
            .enumerate()
            .map(|(index, value)| Allocation::from_value(index, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries, values })
    }

    /// Validated entries.
    #[must_use]
    pub fn entries(&self) -> &[Allocation] {
        &self.entries
    }

    /// Original JSON values, in input order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_allocations_keep_original_values() {
        let values = vec![
            json!({"stock_id": "AAPL:NASDAQ", "action": "long", "percent": 1}),
            json!({"stock_id": "TSLA:NASDAQ", "action": "short", "percent": 0.25, "note": "x"}),
        ];
        let allocations = Allocations::from_values(values.clone()).unwrap();

        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations.values(), values.as_slice());
        assert_eq!(allocations.entries()[1].action, AllocationAction::Short);
        assert_eq!(allocations.entries()[0].percent, 1.0);
    }

    #[test]
    fn empty_allocations_are_allowed() {
        let allocations = Allocations::from_values(vec![]).unwrap();
        assert!(allocations.is_empty());
    }

    #[test]
    fn percent_above_one_is_rejected() {
        let err = Allocations::from_values(vec![
            json!({"stock_id": "AAPL:NASDAQ", "action": "long", "percent": 1.5}),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::OutOfRange { ref field, .. } if field == "allocations[0].percent"));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Allocations::from_values(vec![
            json!({"stock_id": "AAPL:NASDAQ", "action": "buy", "percent": 0.5}),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("allocations[0].action"));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err =
            Allocations::from_values(vec![json!({"stock_id": "AAPL:NASDAQ", "action": "long"})])
                .unwrap_err();
        assert!(err.to_string().contains("percent"));
    }

    #[test]
    fn empty_stock_id_is_rejected() {
        let err = Allocations::from_values(vec![
            json!({"stock_id": "", "action": "long", "percent": 0.5}),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::EmptyValue {
                field: "allocations[0].stock_id".to_string()
            }
        );
    }
}
