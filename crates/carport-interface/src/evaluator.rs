//! Canonical state → safety and control notifications.
//!
//! Every rule is evaluated independently and the result is a set, so a cycle
//! may raise several notifications. Nothing is latched across cycles: the
//! generic event pipeline decides engage and disengage transitions.

use carport_errors::{CycleResult, InvariantError};
use carport_profile::VehicleProfile;
use tracing::{error, trace};

use crate::events::{ButtonEvent, ButtonKind, Notification, NotificationSet};
use crate::state::CanonicalState;

/// Classify the conditions of one translated cycle.
///
/// # Errors
///
/// Returns [`InvariantError::TooManyButtonEvents`] if more than one event is
/// supplied, and [`InvariantError::ForeignButtonEvents`] if the events are not
/// the ones the translator attached to `state`.
pub fn evaluate(
    profile: &VehicleProfile,
    state: &CanonicalState,
    button_events: &[ButtonEvent],
) -> CycleResult<NotificationSet> {
    if button_events.len() > 1 {
        let err = InvariantError::TooManyButtonEvents {
            count: button_events.len(),
        };
        error!(error = %err, cycle = state.cycle, "Rejected cycle evaluation");
        return Err(err);
    }
    if button_events != state.button_events.as_slice() {
        let err = InvariantError::ForeignButtonEvents;
        error!(error = %err, cycle = state.cycle, "Rejected cycle evaluation");
        return Err(err);
    }

    let mut set = NotificationSet::new();

    if state.v_ego < profile.min_enable_speed() {
        set.insert(Notification::BelowEngageSpeed);
    }
    if state.park_brake {
        set.insert(Notification::ParkBrake);
    }
    if state.cruise_state.standstill {
        set.insert(Notification::ResumeRequired);
    }
    if !profile.is_no_factory_controller() && state.stock_controller_faulted {
        set.insert(Notification::ControllerFaulted);
    }
    if state.v_ego < profile.min_steer_speed() {
        set.insert(Notification::BelowSteerSpeed);
    }

    for event in button_events {
        match (event.kind, event.pressed) {
            // Enable fires on release, matching the stalk's own debounce.
            (ButtonKind::AccelCruise | ButtonKind::DecelCruise, false) => {
                set.insert(Notification::ButtonEnable);
            }
            (ButtonKind::Cancel, true) => set.insert(Notification::ButtonCancel),
            _ => {}
        }
    }

    trace!(cycle = state.cycle, notifications = %set, "Evaluated cycle");
    Ok(set)
}

/// [`evaluate`], additionally rejecting a state not produced in `current_cycle`.
///
/// # Errors
///
/// Returns [`InvariantError::StaleState`] on a cycle mismatch, otherwise the
/// errors of [`evaluate`].
pub fn evaluate_at(
    profile: &VehicleProfile,
    state: &CanonicalState,
    button_events: &[ButtonEvent],
    current_cycle: u64,
) -> CycleResult<NotificationSet> {
    if state.cycle != current_cycle {
        let err = InvariantError::StaleState {
            state_cycle: state.cycle,
            current_cycle,
        };
        error!(error = %err, "Rejected cycle evaluation");
        return Err(err);
    }
    evaluate(profile, state, button_events)
}
