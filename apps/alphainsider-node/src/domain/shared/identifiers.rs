//! Strongly-typed identifiers for AlphaInsider entities.
//!
//! These prevent mixing up strategy, stock and user IDs at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::DomainError;

macro_rules! define_id {
    ($name:ident, $field:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier, rejecting empty or whitespace-only input.
            pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::EmptyValue {
                        field: $field.to_string(),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(StrategyId, "strategy_id", "Identifier of a user-owned trading strategy.");
define_id!(
    StockId,
    "stock_id",
    "Identifier of a stock, either `SYMBOL:EXCHANGE` or a raw stock id."
);
define_id!(UserId, "user_id", "Identifier of an AlphaInsider user.");
