//! Error types for the carport vehicle interface layer
//!
//! The interface layer distinguishes three kinds of failure:
//!
//! - [`profile`]: configuration gaps while resolving a vehicle profile
//!   (unsupported model ids, malformed tuning curves)
//! - [`invariant`]: per-cycle logic invariants that were violated by the
//!   caller; these are non-recoverable and must stop the session
//! - [`validation`]: rejected configuration values
//!
//! [`common`] holds the top-level [`CarportError`] and its classification.
//!
//! Transient signal loss is deliberately absent: an invalid bus is surfaced
//! as data in the canonical state, never as an error.
//!
//! # Example
//!
//! ```
//! use carport_errors::prelude::*;
//!
//! fn check_events(count: usize) -> Result<()> {
//!     if count > 1 {
//!         return Err(InvariantError::TooManyButtonEvents { count }.into());
//!     }
//!     Ok(())
//! }
//!
//! let err = check_events(2).unwrap_err();
//! assert_eq!(err.severity(), ErrorSeverity::Critical);
//! assert!(!err.is_recoverable());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod invariant;
pub mod prelude;
pub mod profile;
pub mod validation;

pub use common::{CarportError, ErrorCategory, ErrorSeverity};
pub use invariant::InvariantError;
pub use profile::ProfileError;
pub use validation::ValidationError;

/// A specialized `Result` type for carport operations.
pub type Result<T> = std::result::Result<T, CarportError>;

/// A specialized `Result` type for per-cycle operations.
pub type CycleResult<T = ()> = std::result::Result<T, InvariantError>;
