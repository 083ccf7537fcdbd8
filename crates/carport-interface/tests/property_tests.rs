//! Property tests for the per-cycle pipeline.

use carport_interface::{
    AccState, CanonicalState, CruiseButton, DecodedSignals, Notification, OutputGate, evaluate,
    translate,
};
use carport_profile::{CarModel, Fingerprint, resolve};
use proptest::prelude::*;

fn model_strategy() -> impl Strategy<Value = CarModel> {
    prop::sample::select(CarModel::SUPPORTED.to_vec())
}

fn fingerprint_strategy() -> impl Strategy<Value = Fingerprint> {
    any::<bool>().prop_map(|pedal| {
        if pedal {
            Fingerprint::new().with_message(0, 0x201, 6)
        } else {
            Fingerprint::new()
        }
    })
}

fn signals_strategy() -> impl Strategy<Value = DecodedSignals> {
    (
        0.0f64..45.0,
        any::<bool>(),
        0u8..8,
        0u8..6,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(v_ego, standstill, buttons, acc, park_brake, gas_pressed)| DecodedSignals {
            v_ego,
            standstill,
            cruise_buttons: CruiseButton::from_raw(buttons),
            acc_state: AccState::from_raw(acc),
            park_brake,
            gas_pressed,
            ..DecodedSignals::default()
        })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn prop_first_cycle_never_emits(model in model_strategy(), fp in fingerprint_strategy(), s in signals_strategy()) {
        let profile = resolve(model, &fp);
        let (_, events) = translate(&profile, &CanonicalState::default(), &s);
        prop_assert!(events.is_empty());
    }

    #[test]
    fn prop_at_most_one_event_per_cycle(
        model in model_strategy(),
        fp in fingerprint_strategy(),
        trace in prop::collection::vec(signals_strategy(), 1..40),
    ) {
        let profile = resolve(model, &fp);
        let mut state = CanonicalState::default();
        for s in &trace {
            let (next, events) = translate(&profile, &state, s);
            prop_assert!(events.len() <= 1);
            prop_assert_eq!(next.button_events.as_slice(), events.as_slice());
            prop_assert!(evaluate(&profile, &next, &events).is_ok());
            state = next;
        }
    }

    #[test]
    fn prop_evaluation_is_idempotent(
        model in model_strategy(),
        fp in fingerprint_strategy(),
        a in signals_strategy(),
        b in signals_strategy(),
    ) {
        let profile = resolve(model, &fp);
        let (s1, _) = translate(&profile, &CanonicalState::default(), &a);
        let (s2, events) = translate(&profile, &s1, &b);
        let first = evaluate(&profile, &s2, &events);
        let second = evaluate(&profile, &s2, &events);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_below_engage_speed_boundary(model in model_strategy(), eps in 1e-9f64..5.0) {
        let profile = resolve(model, &Fingerprint::new());
        let min = profile.min_enable_speed();
        let below = CanonicalState { v_ego: min - eps, ..CanonicalState::default() };
        let at = CanonicalState { v_ego: min, ..CanonicalState::default() };
        prop_assert!(evaluate(&profile, &below, &[]).map(|n| n.contains(Notification::BelowEngageSpeed)).unwrap_or(false));
        prop_assert!(!evaluate(&profile, &at, &[]).map(|n| n.contains(Notification::BelowEngageSpeed)).unwrap_or(true));
    }

    #[test]
    fn prop_gate_never_adds_enable(
        model in model_strategy(),
        fp in fingerprint_strategy(),
        gas_pressed in any::<bool>(),
        requested in any::<bool>(),
    ) {
        let profile = resolve(model, &fp);
        let state = CanonicalState { gas_pressed, ..CanonicalState::default() };
        let enabled = OutputGate::default().effective_enabled(&profile, &state, requested);
        prop_assert!(!enabled || requested);
        if !gas_pressed {
            prop_assert_eq!(enabled, requested);
        }
    }

    #[test]
    fn prop_hud_clamp(speed in -10.0f64..200.0) {
        let gate = OutputGate::default();
        let shown = gate.clamp_hud_speed(speed);
        if speed > 70.0 {
            prop_assert!(shown.abs() < f64::EPSILON);
        } else {
            prop_assert!((shown - speed).abs() < f64::EPSILON);
        }
    }
}
