//! Configuration validation errors.

use core::fmt;

use crate::common::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
    },

    /// Value is NaN or infinite
    #[error("{0} must be finite")]
    NotFinite(String),
}

impl ValidationError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }
    }

    /// Create a not-positive error.
    pub fn not_positive<T: fmt::Debug>(field: impl Into<String>, value: T) -> Self {
        ValidationError::NotPositive {
            field: field.into(),
            value: format!("{value:?}"),
        }
    }

    /// Create a not-finite error.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite(field.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = ValidationError::out_of_range("hud_speed_ceiling", 500.0, 0.0, 100.0);
        let msg = err.to_string();
        assert!(msg.contains("hud_speed_ceiling"));
        assert!(msg.contains("500.0"));
    }

    #[test]
    fn test_not_positive_message() {
        let err = ValidationError::not_positive("control_period_s", -0.01);
        assert!(err.to_string().contains("must be positive"));
    }
}
