//! Per-cycle logic invariants.
//!
//! These errors describe programming errors in the caller, not conditions of
//! the vehicle. They are:
//! - `Copy` so they can be raised on the control cycle without allocating
//! - always [`ErrorSeverity::Critical`]
//! - never retried inside the interface layer

use crate::common::ErrorSeverity;

/// Per-cycle invariant violations.
///
/// # Examples
///
/// ```
/// use carport_errors::{InvariantError, ErrorSeverity};
///
/// let err = InvariantError::StaleState { state_cycle: 4, current_cycle: 5 };
/// assert_eq!(err.code(), 2);
/// assert_eq!(err.severity(), ErrorSeverity::Critical);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum InvariantError {
    /// More than one button event was synthesized in a single cycle
    #[error("{count} button events in one cycle, at most 1 is allowed")]
    TooManyButtonEvents {
        /// Number of events that were presented
        count: usize,
    },

    /// A state produced in an earlier cycle was presented for evaluation
    #[error("state from cycle {state_cycle} evaluated during cycle {current_cycle}")]
    StaleState {
        /// Cycle stamp carried by the state
        state_cycle: u64,
        /// Cycle the evaluator is running in
        current_cycle: u64,
    },

    /// The button events presented were not produced with the evaluated state
    #[error("button events do not belong to the evaluated state")]
    ForeignButtonEvents,
}

impl InvariantError {
    /// Numeric code for compact logging.
    pub fn code(self) -> u8 {
        match self {
            InvariantError::TooManyButtonEvents { .. } => 1,
            InvariantError::StaleState { .. } => 2,
            InvariantError::ForeignButtonEvents => 3,
        }
    }

    /// Get the error severity.
    pub fn severity(self) -> ErrorSeverity {
        ErrorSeverity::Critical
    }
}
