//! Prelude module for convenient error handling imports.

pub use crate::{
    CycleResult, Result,
    common::{CarportError, ErrorCategory, ErrorSeverity},
    invariant::InvariantError,
    profile::ProfileError,
    validation::ValidationError,
};

/// Return early with an error when a condition does not hold.
///
/// # Example
///
/// ```
/// use carport_errors::prelude::*;
/// use carport_errors::validate;
///
/// fn check(period: f64) -> Result<()> {
///     validate!(period > 0.0, ValidationError::not_positive("period", period));
///     Ok(())
/// }
///
/// assert!(check(0.01).is_ok());
/// assert!(check(0.0).is_err());
/// ```
#[macro_export]
macro_rules! validate {
    ($condition:expr, $error:expr) => {
        if !$condition {
            return Err($error.into());
        }
    };
}
