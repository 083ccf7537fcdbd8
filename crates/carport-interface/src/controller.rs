//! Command planning downstream of the output gate.
//!
//! [`GmCarController`] turns each gated command into the typed messages the
//! low-level encoder frames for the bus. Message payload packing, counters
//! in bytes and checksums stay with the encoder.

use carport_profile::{ControllerLimits, VehicleProfile};
use carport_tuning::units::MS_TO_KPH;
use serde::Serialize;
use tracing::trace;

use crate::gate::{GatedCommand, VisualAlert};
use crate::state::CanonicalState;

/// Receives gated commands once per frame.
pub trait CarController {
    type Output;

    fn update(&mut self, command: &GatedCommand, state: &CanonicalState, frame: u64)
    -> Self::Output;

    /// Whether the last steering request was clipped by rate limits.
    fn steer_rate_limited(&self) -> bool {
        false
    }
}

/// Physical bus a message is sent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanBus {
    Powertrain = 0,
    Obstacle = 1,
    Chassis = 2,
    SwGmlan = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PedalParameter {
    Multiplier,
    Divisor,
    Offset,
}

/// A message to be framed by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum ControlMessage {
    SteeringControl {
        bus: CanBus,
        torque: i32,
        counter: u8,
        active: bool,
    },
    FrictionBrake {
        bus: CanBus,
        brake: i32,
        counter: u8,
        near_stop: bool,
        at_full_stop: bool,
    },
    GasRegen {
        bus: CanBus,
        gas: i32,
        counter: u8,
        enabled: bool,
        at_full_stop: bool,
    },
    PedalGas {
        bus: CanBus,
        gas: f64,
        counter: u8,
    },
    PedalCalibration {
        bus: CanBus,
        parameter: PedalParameter,
        value: u16,
        counter: u8,
    },
    AccDashboard {
        bus: CanBus,
        enabled: bool,
        set_speed_kph: f64,
        lead_visible: bool,
        fcw: bool,
    },
    AdasTimeStatus {
        bus: CanBus,
        ticks: i64,
        counter: u8,
    },
    AdasHeadlights {
        bus: CanBus,
    },
    AdasSteeringStatus {
        bus: CanBus,
        counter: u8,
    },
    AdasAccelerometerSpeed {
        bus: CanBus,
        speed: f64,
        counter: u8,
    },
    AdasKeepalive {
        bus: CanBus,
    },
    LkaIcon {
        bus: CanBus,
        active: bool,
        critical: bool,
        steer_alert: bool,
    },
}

const PEDAL_STEP: u64 = 4;
const PEDAL_CALIBRATION_STEP: u64 = 8;
const PEDAL_CALIBRATION: [(PedalParameter, u16); 3] = [
    (PedalParameter::Multiplier, 1545),
    (PedalParameter::Divisor, 1000),
    (PedalParameter::Offset, 25),
];
const LONGITUDINAL_STEP: u64 = 4;
const DASHBOARD_STEP: u64 = 4;
const TIME_AND_HEADLIGHTS_STEP: u64 = 10;
const SPEED_AND_ACCELEROMETER_STEP: u64 = 2;
const LKA_CRITICAL_STEER: f64 = 0.9;

fn counter(frame: u64, step: u64) -> u8 {
    // Always < 4.
    ((frame / step.max(1)) % 4) as u8
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LkaIconStatus {
    active: bool,
    critical: bool,
}

/// Command planner for this brand.
#[derive(Debug, Clone)]
pub struct GmCarController {
    limits: ControllerLimits,
    no_factory_controller: bool,
    has_gas_interceptor: bool,
    control_period: f64,
    start_time: f64,
    apply_steer_last: i32,
    lka_icon_last: LkaIconStatus,
    steer_rate_limited: bool,
}

impl GmCarController {
    pub fn new(profile: &VehicleProfile, control_period: f64) -> Self {
        Self {
            limits: ControllerLimits::for_profile(profile),
            no_factory_controller: profile.is_no_factory_controller(),
            has_gas_interceptor: profile.has_gas_interceptor(),
            control_period,
            start_time: 0.0,
            apply_steer_last: 0,
            lka_icon_last: LkaIconStatus::default(),
            steer_rate_limited: false,
        }
    }

    pub fn limits(&self) -> &ControllerLimits {
        &self.limits
    }

    /// Torque applied on the last steering frame.
    pub fn last_steer(&self) -> i32 {
        self.apply_steer_last
    }

    fn plan_steering(
        &mut self,
        command: &GatedCommand,
        state: &CanonicalState,
        frame: u64,
        out: &mut Vec<ControlMessage>,
    ) {
        let step = self.limits.steer_step.max(1);
        if frame % step != 0 {
            return;
        }
        let active = command.enabled
            && !(state.steer_warning || state.steer_error)
            && state.v_ego > self.limits.min_steer_speed;

        let torque = if active {
            let requested = self.limits.steer_request(command.actuators.steer);
            let applied =
                self.limits
                    .limit_steer_torque(requested, self.apply_steer_last, state.steering_torque);
            self.steer_rate_limited = requested != applied;
            applied
        } else {
            0
        };
        self.apply_steer_last = torque;

        out.push(ControlMessage::SteeringControl {
            bus: CanBus::Powertrain,
            torque,
            counter: counter(frame, step),
            active,
        });
    }

    fn plan_longitudinal(
        &self,
        command: &GatedCommand,
        state: &CanonicalState,
        frame: u64,
        out: &mut Vec<ControlMessage>,
    ) {
        let enabled = command.enabled;
        let accel = command.actuators.accel;

        if !self.no_factory_controller {
            if frame % LONGITUDINAL_STEP != 0 {
                return;
            }
            // The factory ECU holds maximum regen while disengaged.
            let (gas, brake) = if enabled {
                (self.limits.gas_command(accel), self.limits.brake_command(accel))
            } else {
                (self.limits.max_acc_regen, 0)
            };
            let idx = counter(frame, LONGITUDINAL_STEP);
            let at_full_stop = enabled && state.standstill;
            let near_stop = enabled && state.v_ego < self.limits.near_stop_brake_phase;
            out.push(ControlMessage::FrictionBrake {
                bus: CanBus::Chassis,
                brake,
                counter: idx,
                near_stop,
                at_full_stop,
            });
            out.push(ControlMessage::GasRegen {
                bus: CanBus::Powertrain,
                gas,
                counter: idx,
                enabled,
                at_full_stop,
            });
        } else if self.has_gas_interceptor {
            let idx = counter(frame, PEDAL_STEP);
            if frame % PEDAL_STEP == 0 {
                out.push(ControlMessage::PedalGas {
                    bus: CanBus::Powertrain,
                    gas: accel.clamp(0.0, 1.0),
                    counter: idx,
                });
            }
            // The pedal ADC reads low against this ECM; resend the
            // correction often in case the pedal resets.
            if frame % PEDAL_CALIBRATION_STEP == 0 {
                out.extend(PEDAL_CALIBRATION.iter().map(|&(parameter, value)| {
                    ControlMessage::PedalCalibration {
                        bus: CanBus::Powertrain,
                        parameter,
                        value,
                        counter: idx,
                    }
                }));
            }
        }
    }

    fn plan_factory_status(
        &self,
        command: &GatedCommand,
        state: &CanonicalState,
        frame: u64,
        out: &mut Vec<ControlMessage>,
    ) {
        if self.no_factory_controller {
            return;
        }
        if frame % DASHBOARD_STEP == 0 {
            out.push(ControlMessage::AccDashboard {
                bus: CanBus::Powertrain,
                enabled: command.enabled,
                set_speed_kph: command.hud_speed * MS_TO_KPH,
                lead_visible: command.lead_visible,
                fcw: command.visual_alert == VisualAlert::Fcw,
            });
        }

        // The radar expects speed and yaw at 50 Hz and an ADAS heartbeat at 10 Hz.
        if frame % TIME_AND_HEADLIGHTS_STEP == 0 {
            let elapsed = frame as f64 * self.control_period - self.start_time;
            out.push(ControlMessage::AdasTimeStatus {
                bus: CanBus::Obstacle,
                ticks: (elapsed * 60.0) as i64,
                counter: counter(frame, TIME_AND_HEADLIGHTS_STEP),
            });
            out.push(ControlMessage::AdasHeadlights {
                bus: CanBus::Obstacle,
            });
        }
        if frame % SPEED_AND_ACCELEROMETER_STEP == 0 {
            let idx = counter(frame, SPEED_AND_ACCELEROMETER_STEP);
            out.push(ControlMessage::AdasSteeringStatus {
                bus: CanBus::Obstacle,
                counter: idx,
            });
            out.push(ControlMessage::AdasAccelerometerSpeed {
                bus: CanBus::Obstacle,
                speed: state.v_ego,
                counter: idx,
            });
        }
        if frame % self.limits.adas_keepalive_step.max(1) == 0 {
            out.push(ControlMessage::AdasKeepalive {
                bus: CanBus::Powertrain,
            });
        }
    }

    fn plan_lka_icon(
        &mut self,
        command: &GatedCommand,
        state: &CanonicalState,
        frame: u64,
        out: &mut Vec<ControlMessage>,
    ) {
        let active = state.lkas_status == 1;
        let status = LkaIconStatus {
            active,
            critical: active && command.actuators.steer.abs() > LKA_CRITICAL_STEER,
        };
        // The icon disappears after a few seconds unless refreshed.
        if frame % self.limits.camera_keepalive_step.max(1) == 0 || status != self.lka_icon_last {
            out.push(ControlMessage::LkaIcon {
                bus: CanBus::SwGmlan,
                active: status.active,
                critical: status.critical,
                steer_alert: matches!(
                    command.visual_alert,
                    VisualAlert::SteerRequired | VisualAlert::Ldw
                ),
            });
            self.lka_icon_last = status;
        }
    }
}

impl CarController for GmCarController {
    type Output = Vec<ControlMessage>;

    fn update(&mut self, command: &GatedCommand, state: &CanonicalState, frame: u64) -> Self::Output {
        let mut out = Vec::with_capacity(12);
        self.plan_steering(command, state, frame, &mut out);
        self.plan_longitudinal(command, state, frame, &mut out);
        self.plan_factory_status(command, state, frame, &mut out);
        self.plan_lka_icon(command, state, frame, &mut out);
        trace!(frame, messages = out.len(), "Planned control messages");
        out
    }

    fn steer_rate_limited(&self) -> bool {
        self.steer_rate_limited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Actuators;
    use carport_profile::{CarModel, Fingerprint, resolve};

    fn command(enabled: bool, steer: f64, accel: f64) -> GatedCommand {
        GatedCommand {
            enabled,
            actuators: Actuators { steer, accel },
            hud_speed: 20.0,
            lanes_visible: true,
            lead_visible: false,
            visual_alert: VisualAlert::None,
        }
    }

    fn moving() -> CanonicalState {
        CanonicalState {
            v_ego: 20.0,
            standstill: false,
            ..CanonicalState::default()
        }
    }

    fn steering(messages: &[ControlMessage]) -> Option<(i32, bool)> {
        messages.iter().find_map(|m| match m {
            ControlMessage::SteeringControl { torque, active, .. } => Some((*torque, *active)),
            _ => None,
        })
    }

    #[test]
    fn test_steering_is_rate_limited() {
        let profile = resolve(CarModel::Volt, &Fingerprint::new());
        let mut cc = GmCarController::new(&profile, 0.01);
        let out = cc.update(&command(true, 1.0, 0.0), &moving(), 0);
        assert_eq!(steering(&out), Some((7, true)));
        assert!(cc.steer_rate_limited());

        let out = cc.update(&command(true, 1.0, 0.0), &moving(), 2);
        assert_eq!(steering(&out), Some((14, true)));
    }

    #[test]
    fn test_steering_frame_step() {
        let profile = resolve(CarModel::Volt, &Fingerprint::new());
        let mut cc = GmCarController::new(&profile, 0.01);
        assert_eq!(steering(&cc.update(&command(true, 0.1, 0.0), &moving(), 1)), None);

        let bolt = resolve(CarModel::BoltNoAcc, &Fingerprint::new());
        let mut cc = GmCarController::new(&bolt, 0.01);
        assert!(steering(&cc.update(&command(true, 0.1, 0.0), &moving(), 1)).is_some());
    }

    #[test]
    fn test_steering_inactive_when_slow_or_warning() {
        let profile = resolve(CarModel::Volt, &Fingerprint::new());
        let mut cc = GmCarController::new(&profile, 0.01);

        let slow = CanonicalState {
            v_ego: 2.0,
            ..moving()
        };
        assert_eq!(steering(&cc.update(&command(true, 0.5, 0.0), &slow, 0)), Some((0, false)));

        let warning = CanonicalState {
            steer_warning: true,
            ..moving()
        };
        assert_eq!(steering(&cc.update(&command(true, 0.5, 0.0), &warning, 2)), Some((0, false)));
    }

    #[test]
    fn test_disabled_sends_max_regen() {
        let profile = resolve(CarModel::Volt, &Fingerprint::new());
        let mut cc = GmCarController::new(&profile, 0.01);
        let out = cc.update(&command(false, 0.0, 1.5), &moving(), 0);
        assert!(out.iter().any(|m| matches!(
            m,
            ControlMessage::GasRegen {
                gas: 1404,
                enabled: false,
                ..
            }
        )));
        assert!(out.iter().any(|m| matches!(m, ControlMessage::FrictionBrake { brake: 0, .. })));
    }

    #[test]
    fn test_pedal_messages_for_no_acc_interceptor() {
        let profile = resolve(CarModel::BoltNoAcc, &Fingerprint::new().with_message(0, 0x201, 6));
        let mut cc = GmCarController::new(&profile, 0.01);

        let out = cc.update(&command(true, 0.0, 2.0), &moving(), 8);
        let pedal: Vec<f64> = out
            .iter()
            .filter_map(|m| match m {
                ControlMessage::PedalGas { gas, .. } => Some(*gas),
                _ => None,
            })
            .collect();
        assert_eq!(pedal.len(), 1);
        assert!(pedal.iter().all(|g| (*g - 1.0).abs() < f64::EPSILON));
        let calibration = out
            .iter()
            .filter(|m| matches!(m, ControlMessage::PedalCalibration { .. }))
            .count();
        assert_eq!(calibration, 3);

        let out = cc.update(&command(true, 0.0, 0.5), &moving(), 4);
        assert!(!out.iter().any(|m| matches!(m, ControlMessage::PedalCalibration { .. })));
        assert!(!out.iter().any(|m| matches!(m, ControlMessage::GasRegen { .. })));
        assert!(!out.iter().any(|m| matches!(m, ControlMessage::AccDashboard { .. })));
    }

    #[test]
    fn test_lka_icon_on_change_and_keepalive() {
        let profile = resolve(CarModel::Volt, &Fingerprint::new());
        let mut cc = GmCarController::new(&profile, 0.01);
        let is_icon = |m: &ControlMessage| matches!(m, ControlMessage::LkaIcon { .. });

        assert!(cc.update(&command(true, 0.0, 0.0), &moving(), 0).iter().any(is_icon));
        assert!(!cc.update(&command(true, 0.0, 0.0), &moving(), 1).iter().any(is_icon));

        let lka = CanonicalState {
            lkas_status: 1,
            ..moving()
        };
        let out = cc.update(&command(true, 0.95, 0.0), &lka, 3);
        assert!(out.iter().any(|m| matches!(
            m,
            ControlMessage::LkaIcon {
                active: true,
                critical: true,
                ..
            }
        )));
        assert!(cc.update(&command(true, 0.0, 0.0), &moving(), 100).iter().any(is_icon));
    }
}
