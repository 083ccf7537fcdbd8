//! Top-level error type and classification shared by every carport crate.

use core::fmt;

use crate::{InvariantError, ProfileError, ValidationError};

/// Top-level error that wraps every carport sub-error.
#[derive(Debug, thiserror::Error)]
pub enum CarportError {
    /// A per-cycle invariant was violated
    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    /// Vehicle profile resolution errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Rejected configuration values
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CarportError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CarportError::Invariant(_) => ErrorCategory::Invariant,
            CarportError::Profile(_) => ErrorCategory::Profile,
            CarportError::Validation(_) => ErrorCategory::Validation,
            CarportError::Config(_) => ErrorCategory::Config,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CarportError::Invariant(e) => e.severity(),
            CarportError::Profile(e) => e.severity(),
            CarportError::Validation(e) => e.severity(),
            CarportError::Config(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Invariant violations are never recoverable: the session that produced
    /// them has to be torn down by its owner.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        CarportError::Config(msg.into())
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Per-cycle invariant violations
    Invariant = 0,
    /// Vehicle profile errors
    Profile = 1,
    /// Configuration loading errors
    Config = 2,
    /// Validation errors
    Validation = 3,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Invariant => write!(f, "Invariant"),
            ErrorCategory::Profile => write!(f, "Profile"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Validation => write!(f, "Validation"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the session must not continue
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Invariant.to_string(), "Invariant");
        assert_eq!(ErrorCategory::Profile.to_string(), "Profile");
        assert_eq!(ErrorCategory::Validation.to_string(), "Validation");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_invariant_is_not_recoverable() {
        let err: CarportError = InvariantError::ForeignButtonEvents.into();
        assert_eq!(err.category(), ErrorCategory::Invariant);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_config_error_is_recoverable() {
        let err = CarportError::config("missing field");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("missing field"));
    }
}
