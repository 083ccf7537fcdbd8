//! Vehicle profile registry
//!
//! Resolves a model tag plus the fingerprint observed on the bus at session
//! start into an immutable [`VehicleProfile`]: geometry, lateral and
//! longitudinal tuning, enable/steer speed thresholds and feature flags.
//!
//! Resolution is total. A model id that is not in the catalogue resolves to
//! the baseline profile of [`CarModel::Unknown`], because the caller has
//! already validated the model against the supported list.
//!
//! # Example
//!
//! ```
//! use carport_profile::{CarModel, Fingerprint, resolve};
//!
//! let fingerprint = Fingerprint::new().with_message(0, 0x201, 6);
//! let profile = resolve(CarModel::BoltNoAcc, &fingerprint);
//!
//! assert!(profile.has_gas_interceptor());
//! assert!(profile.is_no_factory_controller());
//! assert!(profile.min_enable_speed() < 2.5);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod fingerprint;
pub mod limits;
pub mod model;
pub mod profile;
pub mod registry;

pub use fingerprint::{Fingerprint, GAS_INTERCEPTOR, SignalAddress};
pub use limits::{ControllerLimits, pid_accel_limits};
pub use model::{CarModel, SafetyModel};
pub use profile::{
    Dynamics, EstimatedFields, Features, Geometry, ProfileDraft, ProfileField, Thresholds,
    VehicleProfile,
};
pub use registry::{VehicleProfileRegistry, resolve, resolve_id};

/// Brand name reported in every profile of this port.
pub const CAR_NAME: &str = "gm";
