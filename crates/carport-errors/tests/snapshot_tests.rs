//! Snapshot tests for error message formatting.
//!
//! Operators grep logs for these strings; keep them stable.

use carport_errors::{CarportError, InvariantError, ProfileError, ValidationError};
use insta::assert_snapshot;

#[test]
fn test_too_many_button_events() {
    assert_snapshot!(
        InvariantError::TooManyButtonEvents { count: 2 }.to_string(),
        @"2 button events in one cycle, at most 1 is allowed"
    );
}

#[test]
fn test_stale_state() {
    assert_snapshot!(
        InvariantError::StaleState { state_cycle: 4, current_cycle: 5 }.to_string(),
        @"state from cycle 4 evaluated during cycle 5"
    );
}

#[test]
fn test_wrapped_invariant() {
    let err: CarportError = InvariantError::ForeignButtonEvents.into();
    assert_snapshot!(
        err.to_string(),
        @"Invariant violated: button events do not belong to the evaluated state"
    );
}

#[test]
fn test_unsupported_model() {
    assert_snapshot!(
        ProfileError::unsupported_model("DELOREAN DMC-12").to_string(),
        @"Unsupported model: DELOREAN DMC-12"
    );
}

#[test]
fn test_invalid_curve() {
    assert_snapshot!(
        ProfileError::invalid_curve("lateral.kp", "breakpoints and values differ in length").to_string(),
        @"Invalid tuning curve 'lateral.kp': breakpoints and values differ in length"
    );
}

#[test]
fn test_out_of_range() {
    assert_snapshot!(
        ValidationError::out_of_range("hud_speed_ceiling", 500.0_f64, 0.0, 100.0).to_string(),
        @"hud_speed_ceiling value 500.0 is out of range [0.0, 100.0]"
    );
}

#[test]
fn test_not_positive() {
    assert_snapshot!(
        ValidationError::not_positive("control_period_s", 0.0_f64).to_string(),
        @"control_period_s must be positive, got 0.0"
    );
}
