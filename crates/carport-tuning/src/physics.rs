//! Vehicle dynamics parameters scaled from a reference vehicle.
//!
//! Only a single reference car has measured rotational inertia and tire
//! stiffness. Every other vehicle is scaled from it by mass, wheelbase and
//! weight distribution so that all vehicles show approximately similar
//! dynamic behaviour in the lateral model.

use serde::{Deserialize, Serialize};

/// Standard cargo and occupant allowance added to curb weight, kg.
pub const STD_CARGO_KG: f64 = 136.0;

const REFERENCE_MASS: f64 = 1326.0 + STD_CARGO_KG;
const REFERENCE_WHEELBASE: f64 = 2.70;
const REFERENCE_CENTER_TO_FRONT: f64 = REFERENCE_WHEELBASE * 0.4;
const REFERENCE_CENTER_TO_REAR: f64 = REFERENCE_WHEELBASE - REFERENCE_CENTER_TO_FRONT;
const REFERENCE_ROT_INERTIA: f64 = 2500.0;
const REFERENCE_TIRE_STIFFNESS_FRONT: f64 = 192_150.0;
const REFERENCE_TIRE_STIFFNESS_REAR: f64 = 202_500.0;

/// Front and rear axle cornering stiffness, N/rad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireStiffness {
    /// Front axle.
    pub front: f64,
    /// Rear axle.
    pub rear: f64,
}

/// Yaw moment of inertia in kg·m², scaled by `mass · wheelbase²`.
pub fn scale_rot_inertia(mass: f64, wheelbase: f64) -> f64 {
    REFERENCE_ROT_INERTIA * mass * wheelbase * wheelbase
        / (REFERENCE_MASS * REFERENCE_WHEELBASE * REFERENCE_WHEELBASE)
}

/// Axle cornering stiffness scaled by mass and weight distribution.
///
/// `tire_stiffness_factor` is a per-vehicle multiplier on top of the
/// reference stiffness.
pub fn scale_tire_stiffness(
    mass: f64,
    wheelbase: f64,
    center_to_front: f64,
    tire_stiffness_factor: f64,
) -> TireStiffness {
    let center_to_rear = wheelbase - center_to_front;
    let mass_ratio = mass / REFERENCE_MASS;

    let front = REFERENCE_TIRE_STIFFNESS_FRONT * tire_stiffness_factor * mass_ratio
        * (center_to_rear / wheelbase)
        / (REFERENCE_CENTER_TO_REAR / REFERENCE_WHEELBASE);
    let rear = REFERENCE_TIRE_STIFFNESS_REAR * tire_stiffness_factor * mass_ratio
        * (center_to_front / wheelbase)
        / (REFERENCE_CENTER_TO_FRONT / REFERENCE_WHEELBASE);

    TireStiffness { front, rear }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_vehicle_is_identity() {
        assert_relative_eq!(
            scale_rot_inertia(REFERENCE_MASS, REFERENCE_WHEELBASE),
            REFERENCE_ROT_INERTIA,
            epsilon = 1e-9
        );
        let ts = scale_tire_stiffness(
            REFERENCE_MASS,
            REFERENCE_WHEELBASE,
            REFERENCE_CENTER_TO_FRONT,
            1.0,
        );
        assert_relative_eq!(ts.front, REFERENCE_TIRE_STIFFNESS_FRONT, epsilon = 1e-6);
        assert_relative_eq!(ts.rear, REFERENCE_TIRE_STIFFNESS_REAR, epsilon = 1e-6);
    }

    #[test]
    fn test_inertia_grows_with_wheelbase() {
        assert!(scale_rot_inertia(1700.0, 3.0) > scale_rot_inertia(1700.0, 2.7));
    }

    #[test]
    fn test_factor_scales_linearly() {
        let a = scale_tire_stiffness(1700.0, 2.7, 1.08, 0.444);
        let b = scale_tire_stiffness(1700.0, 2.7, 1.08, 0.888);
        assert_relative_eq!(b.front, 2.0 * a.front, epsilon = 1e-6);
        assert_relative_eq!(b.rear, 2.0 * a.rear, epsilon = 1e-6);
    }

    #[test]
    fn test_forward_weight_loads_front_axle() {
        // CG closer to the front axle puts more weight on it.
        let fwd = scale_tire_stiffness(1700.0, 2.7, 0.9, 1.0);
        let rwd = scale_tire_stiffness(1700.0, 2.7, 1.6, 1.0);
        assert!(fwd.front > rwd.front);
        assert!(fwd.rear < rwd.rear);
    }
}
