//! Tuning primitives for carport vehicle profiles
//!
//! - [`curve`]: breakpoint/gain tuning curves with clamped linear
//!   interpolation, and the PID tuning blocks built from them
//! - [`units`]: the unit conversions vehicle tables are written in
//! - [`physics`]: rotational inertia and tire stiffness scaled from a
//!   reference vehicle
//!
//! Everything here is pure and allocation-free after construction, so it can
//! be evaluated on the control cycle.
//!
//! # Example
//!
//! ```
//! use carport_tuning::{TuningCurve, units};
//!
//! let kp = TuningCurve::from_points([(5.0, 2.4), (35.0, 1.5)]);
//! assert!((kp.eval(20.0) - 1.95).abs() < 1e-9);
//! assert!((units::mph(18.0) - 8.04672).abs() < 1e-9);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod curve;
pub mod physics;
pub mod units;

pub use curve::{LateralPid, LongitudinalPid, TuningCurve, interp};
pub use physics::{STD_CARGO_KG, TireStiffness, scale_rot_inertia, scale_tire_stiffness};
