//! Vehicle profile errors.
//!
//! Profile resolution itself is total; these errors are only produced by the
//! strict entry points (model id parsing, tuning curve construction).

use crate::common::ErrorSeverity;

/// Vehicle profile errors.
///
/// # Examples
///
/// ```
/// use carport_errors::{ProfileError, ErrorSeverity};
///
/// let err = ProfileError::unsupported_model("DELOREAN DMC-12");
/// assert_eq!(err.severity(), ErrorSeverity::Warning);
/// assert!(err.to_string().contains("DELOREAN"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// Model id is not in the supported catalogue
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// Tuning curve breakpoints and values are inconsistent
    #[error("Invalid tuning curve '{curve}': {reason}")]
    InvalidCurve {
        /// Curve name
        curve: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ProfileError {
    /// Get the error severity.
    ///
    /// An unsupported model degrades to the baseline profile, so it is only
    /// a warning. A malformed curve is a hard error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProfileError::UnsupportedModel(_) => ErrorSeverity::Warning,
            ProfileError::InvalidCurve { .. } => ErrorSeverity::Error,
        }
    }

    /// Create an unsupported model error.
    pub fn unsupported_model(model_id: impl Into<String>) -> Self {
        ProfileError::UnsupportedModel(model_id.into())
    }

    /// Create an invalid curve error.
    pub fn invalid_curve(curve: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::InvalidCurve {
            curve: curve.into(),
            reason: reason.into(),
        }
    }
}
