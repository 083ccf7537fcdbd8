//! Decoded signals → canonical state and button events.

use carport_profile::VehicleProfile;
use tracing::trace;

use crate::events::{ButtonEvent, ButtonEvents, ButtonKind};
use crate::signals::{AccState, CruiseButton, DecodedSignals};
use crate::state::{ButtonEdge, CanonicalState, CruiseState};

/// Translate one cycle of decoded signals.
///
/// Pure in `(profile, prev, signals)`. The returned state carries the next
/// cycle stamp, the shifted button history and the synthesized button
/// events; its notification set is left empty for the evaluator.
pub fn translate(
    profile: &VehicleProfile,
    prev: &CanonicalState,
    signals: &DecodedSignals,
) -> (CanonicalState, ButtonEvents) {
    let cruise_state = CruiseState::from_acc(signals.acc_state);
    let cruise_buttons = prev.cruise_buttons.advance(signals.cruise_buttons);

    let button_events: ButtonEvents = cruise_buttons
        .edge()
        .and_then(|edge| classify(profile, edge, cruise_state, signals.standstill))
        .into_iter()
        .collect();

    let cycle = prev.cycle.wrapping_add(1);
    if let Some(event) = button_events.first() {
        trace!(cycle, kind = ?event.kind, pressed = event.pressed, "Button edge");
    }

    let state = CanonicalState {
        cycle,
        v_ego: signals.v_ego,
        standstill: signals.standstill,
        can_valid: signals.can_valid,
        gas_pressed: signals.gas_pressed,
        park_brake: signals.park_brake,
        stock_controller_faulted: signals.acc_state == AccState::Faulted,
        cruise_state,
        cruise_buttons,
        steering_torque: signals.steering_torque,
        steer_warning: signals.steer_warning,
        steer_error: signals.steer_error,
        lkas_status: signals.lkas_status,
        steering_rate_limited: prev.steering_rate_limited,
        button_events: button_events.clone(),
        notifications: Default::default(),
    };
    (state, button_events)
}

fn classify(
    profile: &VehicleProfile,
    edge: ButtonEdge,
    cruise_state: CruiseState,
    standstill: bool,
) -> Option<ButtonEvent> {
    let kind = match edge.code {
        // Resuming from a stop must not also bump the set speed.
        CruiseButton::ResAccel if cruise_state.enabled && standstill => ButtonKind::Unknown,
        CruiseButton::ResAccel => ButtonKind::AccelCruise,
        CruiseButton::DecelSet => ButtonKind::DecelCruise,
        // With a pedal interceptor cancel is the disengage path of the
        // factory cruise, not an event for the pipeline.
        CruiseButton::Cancel if profile.has_gas_interceptor() => return None,
        CruiseButton::Cancel => ButtonKind::Cancel,
        CruiseButton::Main => ButtonKind::AltButton,
        CruiseButton::Init | CruiseButton::Unpress | CruiseButton::Other(_) => ButtonKind::Unknown,
    };
    Some(ButtonEvent {
        kind,
        pressed: edge.pressed,
    })
}
