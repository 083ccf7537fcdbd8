//! Output gating of control commands.

use carport_profile::VehicleProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::CanonicalState;

/// HUD speed targets above this are not displayed.
pub const DEFAULT_HUD_SPEED_CEILING: f64 = 70.0;

/// Visual alert requested by the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualAlert {
    #[default]
    None,
    Fcw,
    SteerRequired,
    BrakePressed,
    WrongGear,
    SeatbeltUnbuckled,
    SpeedTooHigh,
    Ldw,
}

/// Normalized actuator targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actuators {
    /// Steering torque request, -1..=1.
    pub steer: f64,
    /// Longitudinal acceleration request, m/s².
    pub accel: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudControl {
    pub set_speed: f64,
    pub lanes_visible: bool,
    pub lead_visible: bool,
    pub visual_alert: VisualAlert,
}

/// Control command produced by the generic pipeline for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarControl {
    pub enabled: bool,
    pub actuators: Actuators,
    pub hud: HudControl,
}

/// Command after vehicle interlocks, as handed to the car controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GatedCommand {
    pub enabled: bool,
    pub actuators: Actuators,
    pub hud_speed: f64,
    pub lanes_visible: bool,
    pub lead_visible: bool,
    pub visual_alert: VisualAlert,
}

/// Vehicle interlocks between the pipeline and the car controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputGate {
    hud_speed_ceiling: f64,
}

impl Default for OutputGate {
    fn default() -> Self {
        Self::new(DEFAULT_HUD_SPEED_CEILING)
    }
}

impl OutputGate {
    pub fn new(hud_speed_ceiling: f64) -> Self {
        Self { hud_speed_ceiling }
    }

    pub fn hud_speed_ceiling(&self) -> f64 {
        self.hud_speed_ceiling
    }

    /// Enable flag after the gas-pedal interlock.
    ///
    /// The factory cruise faults when a command overlaps driver throttle, so
    /// gas pressed drops enable unless an interceptor is fitted to a car that
    /// still has its factory controller.
    pub fn effective_enabled(
        &self,
        profile: &VehicleProfile,
        state: &CanonicalState,
        requested: bool,
    ) -> bool {
        if !profile.has_gas_interceptor() || profile.is_no_factory_controller() {
            requested && !state.gas_pressed
        } else {
            requested
        }
    }

    /// Out-of-range targets become 0 so the dash shows nothing.
    pub fn clamp_hud_speed(&self, set_speed: f64) -> f64 {
        if set_speed > self.hud_speed_ceiling {
            0.0
        } else {
            set_speed
        }
    }

    pub fn gate(
        &self,
        profile: &VehicleProfile,
        state: &CanonicalState,
        control: &CarControl,
    ) -> GatedCommand {
        let enabled = self.effective_enabled(profile, state, control.enabled);
        if enabled != control.enabled {
            debug!(cycle = state.cycle, "Enable dropped: driver gas pressed");
        }
        GatedCommand {
            enabled,
            actuators: control.actuators,
            hud_speed: self.clamp_hud_speed(control.hud.set_speed),
            lanes_visible: control.hud.lanes_visible,
            lead_visible: control.hud.lead_visible,
            visual_alert: control.hud.visual_alert,
        }
    }
}

/// Gate with the default HUD ceiling.
pub fn gate(profile: &VehicleProfile, state: &CanonicalState, control: &CarControl) -> GatedCommand {
    OutputGate::default().gate(profile, state, control)
}
