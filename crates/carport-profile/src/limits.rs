//! Actuator limits used by the car controller.

use carport_tuning::TuningCurve;
use serde::Serialize;

use crate::profile::VehicleProfile;

/// Steering, gas and brake limits.
///
/// Steering torque is in actuator counts; `steer_step` and the keepalive
/// steps are in control frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerLimits {
    pub steer_max: i32,
    pub steer_step: u64,
    pub steer_delta_up: i32,
    pub steer_delta_down: i32,
    pub steer_driver_allowance: f64,
    pub steer_driver_multiplier: f64,
    pub steer_driver_factor: f64,
    /// m/s
    pub min_steer_speed: f64,
    pub adas_keepalive_step: u64,
    pub camera_keepalive_step: u64,
    /// Gas command the factory ECU sends while disengaged.
    pub max_acc_regen: i32,
    /// m/s
    pub near_stop_brake_phase: f64,
    pub accel_min: f64,
    pub accel_max: f64,
    pub gas_lookup: TuningCurve,
    pub brake_lookup: TuningCurve,
}

impl Default for ControllerLimits {
    fn default() -> Self {
        Self {
            steer_max: 300,
            steer_step: 2,
            steer_delta_up: 7,
            steer_delta_down: 17,
            steer_driver_allowance: 50.0,
            steer_driver_multiplier: 4.0,
            steer_driver_factor: 100.0,
            min_steer_speed: 3.0,
            adas_keepalive_step: 100,
            camera_keepalive_step: 100,
            max_acc_regen: 1404,
            near_stop_brake_phase: 0.5,
            accel_min: -4.0,
            accel_max: 2.0,
            gas_lookup: TuningCurve::from_points([(-1.0, 1404.0), (0.0, 2048.0), (2.0, 3072.0)]),
            brake_lookup: TuningCurve::from_points([(-4.0, 350.0), (-1.0, 0.0)]),
        }
    }
}

impl ControllerLimits {
    /// Limits for a resolved profile.
    ///
    /// Trims without a factory controller use the slower Bolt steering
    /// column rates.
    pub fn for_profile(profile: &VehicleProfile) -> Self {
        let mut limits = Self::default();
        if profile.is_no_factory_controller() {
            limits.steer_step = 1;
            limits.steer_delta_up = 3;
            limits.steer_delta_down = 7;
            limits.min_steer_speed = 3.0;
        }
        limits
    }

    /// Clamp a requested steering torque against driver torque and rate
    /// limits, relative to the last applied torque.
    pub fn limit_steer_torque(&self, requested: i32, last: i32, driver_torque: f64) -> i32 {
        let steer_max = f64::from(self.steer_max);
        let driver_max = steer_max
            + (self.steer_driver_allowance + driver_torque * self.steer_driver_factor)
                * self.steer_driver_multiplier;
        let driver_min = -steer_max
            + (-self.steer_driver_allowance + driver_torque * self.steer_driver_factor)
                * self.steer_driver_multiplier;
        let max_allowed = steer_max.min(driver_max).max(0.0);
        let min_allowed = (-steer_max).max(driver_min).min(0.0);

        let torque = f64::from(requested).clamp(min_allowed, max_allowed);

        let last_f = f64::from(last);
        let up = f64::from(self.steer_delta_up);
        let down = f64::from(self.steer_delta_down);
        let (lo, hi) = if last > 0 {
            ((last_f - down).max(-up), last_f + up)
        } else {
            (last_f - up, (last_f + down).min(up))
        };
        // Both bounds can cross when the driver overpowers the wheel; the rate
        // window wins, like numpy's clip.
        let limited = torque.max(lo).min(hi);

        limited.round_ties_even() as i32
    }

    /// Steering torque request for a normalized steer command in `[-1, 1]`.
    pub fn steer_request(&self, steer: f64) -> i32 {
        (steer * f64::from(self.steer_max)).round_ties_even() as i32
    }

    /// Gas command for a desired acceleration, m/s².
    pub fn gas_command(&self, accel: f64) -> i32 {
        self.gas_lookup.eval(accel).round_ties_even() as i32
    }

    /// Friction brake command for a desired acceleration, m/s².
    pub fn brake_command(&self, accel: f64) -> i32 {
        self.brake_lookup.eval(accel).round_ties_even() as i32
    }
}

/// Acceleration bounds for the longitudinal PID, m/s².
///
/// Speed-independent for this brand.
pub fn pid_accel_limits(
    _profile: &VehicleProfile,
    _current_speed: f64,
    _cruise_speed: f64,
) -> (f64, f64) {
    let limits = ControllerLimits::default();
    (limits.accel_min, limits.accel_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CarModel, Fingerprint, resolve};

    #[test]
    fn test_factory_controller_limits() {
        let limits = ControllerLimits::for_profile(&resolve(CarModel::Volt, &Fingerprint::new()));
        assert_eq!(limits.steer_step, 2);
        assert_eq!(limits.steer_delta_up, 7);
        assert_eq!(limits.steer_delta_down, 17);
    }

    #[test]
    fn test_no_factory_controller_limits() {
        let limits =
            ControllerLimits::for_profile(&resolve(CarModel::BoltNoAcc, &Fingerprint::new()));
        assert_eq!(limits.steer_step, 1);
        assert_eq!(limits.steer_delta_up, 3);
        assert_eq!(limits.steer_delta_down, 7);
        assert_eq!(limits.steer_max, 300);
    }

    #[test]
    fn test_half_counts_round_to_even() {
        let limits = ControllerLimits::default();
        // 2048 + 512 / 1024 lands exactly on 2048.5
        assert_eq!(limits.gas_command(1.0 / 1024.0), 2048);
        assert_eq!(limits.gas_command(3.0 / 1024.0), 2050);
        // 0.375 * 300 = 112.5
        assert_eq!(limits.steer_request(0.375), 112);
        assert_eq!(limits.steer_request(-0.375), -112);
        // Driver torque puts the upper bound exactly on 112.5
        assert_eq!(limits.limit_steer_torque(300, 112, -0.96875), 112);
    }

    #[test]
    fn test_rate_limit_up_from_zero() {
        let limits = ControllerLimits::default();
        assert_eq!(limits.limit_steer_torque(300, 0, 0.0), 7);
        assert_eq!(limits.limit_steer_torque(-300, 0, 0.0), -7);
    }

    #[test]
    fn test_rate_limit_down_towards_zero() {
        let limits = ControllerLimits::default();
        assert_eq!(limits.limit_steer_torque(0, 100, 0.0), 83);
        assert_eq!(limits.limit_steer_torque(0, -100, 0.0), -83);
    }

    #[test]
    fn test_driver_torque_reduces_allowance() {
        let limits = ControllerLimits::default();
        // Driver opposes with -1.0: max allowed = 300 + (50 - 100) * 4 = 100.
        assert_eq!(limits.limit_steer_torque(300, 100, -1.0), 100);
        // Strong opposition clamps to zero, then the rate window applies.
        assert_eq!(limits.limit_steer_torque(300, 100, -5.0), 83);
    }

    #[test]
    fn test_gas_and_brake_lookup() {
        let limits = ControllerLimits::default();
        assert_eq!(limits.gas_command(0.0), 2048);
        assert_eq!(limits.gas_command(-3.0), 1404);
        assert_eq!(limits.gas_command(1.0), 2560);
        assert_eq!(limits.brake_command(0.0), 0);
        assert_eq!(limits.brake_command(-4.0), 350);
        assert_eq!(limits.brake_command(-2.5), 175);
    }

    #[test]
    fn test_pid_accel_limits_constant() {
        let profile = resolve(CarModel::Escalade, &Fingerprint::new());
        for (speed, cruise) in [(0.0, 0.0), (30.0, 35.0)] {
            let (min, max) = pid_accel_limits(&profile, speed, cruise);
            approx::assert_relative_eq!(min, -4.0);
            approx::assert_relative_eq!(max, 2.0);
        }
    }
}
