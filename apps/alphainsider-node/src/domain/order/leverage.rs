//! Order leverage.
//!
//! Leverage is accepted in `[0, 2]` and transmitted with at most two decimal
//! places, truncated toward zero (`1.005` becomes `1.00`, never `1.01`).

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

use crate::domain::shared::DomainError;

/// Decimal places kept on the wire.
const LEVERAGE_SCALE: u32 = 2;

/// Validated leverage multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Leverage(Decimal);

impl Leverage {
    /// Lowest accepted leverage.
    pub const MIN: Decimal = Decimal::ZERO;

    /// Highest accepted leverage.
    pub const MAX: Decimal = Decimal::TWO;

    /// Leverage used when the parameter is not set.
    pub const DEFAULT: f64 = 1.5;

    /// Build leverage from a host-supplied number.
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::invalid(
                "leverage",
                format!("expected a finite number, got {value}"),
            ));
        }

        let decimal = Decimal::from_f64(value).ok_or_else(|| {
            DomainError::invalid("leverage", format!("cannot represent {value}"))
        })?;

        Self::from_decimal(decimal)
    }

    /// Build leverage from a decimal value.
    pub fn from_decimal(value: Decimal) -> Result<Self, DomainError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(DomainError::OutOfRange {
                field: "leverage".to_string(),
                value: value.to_string(),
                min: Self::MIN.to_string(),
                max: Self::MAX.to_string(),
            });
        }

        let truncated = value
            .round_dp_with_strategy(LEVERAGE_SCALE, RoundingStrategy::ToZero)
            .normalize();
        Ok(Self(truncated))
    }

    /// Truncated value as a JSON-friendly float.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl Default for Leverage {
    fn default() -> Self {
        Self(Decimal::new(15, 1))
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
