//! Domain errors for the AlphaInsider connector.

use std::fmt;

/// Domain-level errors raised while building order requests.
///
/// These errors are independent of transport concerns and are always raised
/// before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Value outside its permitted range.
    OutOfRange {
        /// Field name.
        field: String,
        /// Rendered value that was rejected.
        value: String,
        /// Inclusive lower bound.
        min: String,
        /// Inclusive upper bound.
        max: String,
    },

    /// Required field is empty.
    EmptyValue {
        /// Field name.
        field: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidValue`].
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "'{field}' must be between {min} and {max}, got {value}")
            }
            Self::EmptyValue { field } => write!(f, "'{field}' cannot be empty"),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::invalid("action", "unknown action 'hold'");
        let msg = format!("{err}");
        assert!(msg.contains("action"));
        assert!(msg.contains("hold"));
    }

    #[test]
    fn out_of_range_display() {
        let err = DomainError::OutOfRange {
            field: "leverage".to_string(),
            value: "2.5".to_string(),
            min: "0".to_string(),
            max: "2".to_string(),
        };
        assert_eq!(err.to_string(), "'leverage' must be between 0 and 2, got 2.5");
    }

    #[test]
    fn empty_value_display() {
        let err = DomainError::EmptyValue {
            field: "stock_id".to_string(),
        };
        assert_eq!(err.to_string(), "'stock_id' cannot be empty");
    }

    #[test]
    fn domain_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::invalid("x", "y"));
        assert!(err.to_string().contains('x'));
    }
}
