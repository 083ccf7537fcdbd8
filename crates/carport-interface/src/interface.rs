//! The per-vehicle interface session.

use carport_errors::CycleResult;
use carport_profile::{CarModel, Fingerprint, VehicleProfile, VehicleProfileRegistry};
use tracing::info;

use crate::config::InterfaceConfig;
use crate::controller::{CarController, GmCarController};
use crate::evaluator::evaluate_at;
use crate::gate::{CarControl, GatedCommand, OutputGate};
use crate::signals::DecodedSignals;
use crate::state::CanonicalState;
use crate::translator::translate;

/// Owns the profile, the canonical state and the car controller of one
/// vehicle connection.
///
/// Call [`update`](Self::update) then [`apply`](Self::apply) once per control
/// tick. A session is single-threaded; the state it exposes is always the
/// result of a complete translate and evaluate pass.
#[derive(Debug)]
pub struct CarInterface<C = GmCarController> {
    profile: VehicleProfile,
    state: CanonicalState,
    gate: OutputGate,
    controller: C,
    frame: u64,
}

impl CarInterface<GmCarController> {
    pub fn new(profile: VehicleProfile, config: &InterfaceConfig) -> Self {
        let controller = GmCarController::new(&profile, config.control_period);
        Self::with_controller(profile, config, controller)
    }

    /// Resolve the profile for `model` and open a session.
    pub fn open(model: CarModel, fingerprint: &Fingerprint, config: &InterfaceConfig) -> Self {
        let profile = VehicleProfileRegistry::new(config.interceptor).resolve(model, fingerprint);
        info!(
            model = %profile.model(),
            has_gas_interceptor = profile.has_gas_interceptor(),
            no_factory_controller = profile.is_no_factory_controller(),
            "Opened vehicle interface"
        );
        Self::new(profile, config)
    }
}

impl<C: CarController> CarInterface<C> {
    pub fn with_controller(profile: VehicleProfile, config: &InterfaceConfig, controller: C) -> Self {
        Self {
            profile,
            state: CanonicalState::default(),
            gate: OutputGate::new(config.hud_speed_ceiling),
            controller,
            frame: 0,
        }
    }

    /// Translate and evaluate one cycle of decoded signals.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`](carport_errors::InvariantError) if the
    /// cycle breaks a translator invariant. The previously exposed state is
    /// kept in that case.
    pub fn update(&mut self, signals: &DecodedSignals) -> CycleResult<&CanonicalState> {
        let current_cycle = self.next_cycle();
        let (mut next, button_events) = translate(&self.profile, &self.state, signals);
        next.steering_rate_limited = self.controller.steer_rate_limited();
        next.notifications = evaluate_at(&self.profile, &next, &button_events, current_cycle)?;
        self.state = next;
        Ok(&self.state)
    }

    /// Cycle stamp the next [`update`](Self::update) must produce.
    fn next_cycle(&self) -> u64 {
        self.state.cycle.wrapping_add(1)
    }

    /// Gate the command against the current state and hand it to the
    /// controller.
    pub fn apply(&mut self, control: &CarControl) -> C::Output {
        let command = self.gated(control);
        let output = self.controller.update(&command, &self.state, self.frame);
        self.frame = self.frame.wrapping_add(1);
        output
    }

    /// The command `apply` would hand to the controller in this state.
    pub fn gated(&self, control: &CarControl) -> GatedCommand {
        self.gate.gate(&self.profile, &self.state, control)
    }

    pub fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    pub fn state(&self) -> &CanonicalState {
        &self.state
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Frames applied so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::CruiseButton;
    use carport_errors::InvariantError;

    #[test]
    fn test_apply_before_update() {
        let mut ci = CarInterface::open(CarModel::Volt, &Fingerprint::new(), &InterfaceConfig::default());
        let out = ci.apply(&CarControl::default());
        assert!(!out.is_empty());
        assert_eq!(ci.frame(), 1);
        assert_eq!(ci.state().cycle, 0);
    }

    #[test]
    fn test_update_stamps_cycles() -> Result<(), Box<dyn std::error::Error>> {
        let mut ci = CarInterface::open(CarModel::Volt, &Fingerprint::new(), &InterfaceConfig::default());
        for expected in 1..=3 {
            let state = ci.update(&DecodedSignals::default())?;
            assert_eq!(state.cycle, expected);
        }
        Ok(())
    }

    #[test]
    fn test_previous_state_is_stale_for_next_cycle() -> Result<(), Box<dyn std::error::Error>> {
        let mut ci = CarInterface::open(CarModel::Volt, &Fingerprint::new(), &InterfaceConfig::default());
        let previous = ci.update(&DecodedSignals::default())?.clone();
        assert_eq!(
            evaluate_at(ci.profile(), &previous, &[], ci.next_cycle()),
            Err(InvariantError::StaleState {
                state_cycle: 1,
                current_cycle: 2
            })
        );
        assert_eq!(ci.update(&DecodedSignals::default())?.cycle, 2);
        assert_eq!(ci.next_cycle(), 3);
        Ok(())
    }

    #[test]
    fn test_button_edges_across_updates() -> Result<(), Box<dyn std::error::Error>> {
        let mut ci = CarInterface::open(CarModel::Volt, &Fingerprint::new(), &InterfaceConfig::default());
        let press = DecodedSignals {
            v_ego: 25.0,
            standstill: false,
            cruise_buttons: CruiseButton::DecelSet,
            ..DecodedSignals::default()
        };
        let release = DecodedSignals {
            cruise_buttons: CruiseButton::Unpress,
            ..press
        };
        assert!(ci.update(&release)?.button_events.is_empty());
        assert_eq!(ci.update(&press)?.button_events.len(), 1);
        let state = ci.update(&release)?;
        assert!(
            state
                .notifications
                .contains(crate::events::Notification::ButtonEnable)
        );
        Ok(())
    }
}
