//! Canonical per-cycle vehicle state.

use serde::{Deserialize, Serialize};

use crate::events::{ButtonEvents, NotificationSet};
use crate::signals::{AccState, CruiseButton};

/// Factory cruise status as seen by the generic pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CruiseState {
    pub enabled: bool,
    pub standstill: bool,
}

impl CruiseState {
    pub fn from_acc(acc: AccState) -> Self {
        Self {
            enabled: acc != AccState::Off,
            standstill: acc == AccState::Standstill,
        }
    }
}

/// A cruise button press or release inferred from two consecutive codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdge {
    /// Code identifying the button: the new code on press, the previous one
    /// on release.
    pub code: CruiseButton,
    pub pressed: bool,
}

/// Current and previous raw cruise button codes.
///
/// Both start at [`CruiseButton::Init`], which never produces an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CruiseButtonHistory {
    pub current: CruiseButton,
    pub previous: CruiseButton,
}

impl Default for CruiseButtonHistory {
    fn default() -> Self {
        Self {
            current: CruiseButton::Init,
            previous: CruiseButton::Init,
        }
    }
}

impl CruiseButtonHistory {
    /// Shift in this cycle's code.
    #[must_use]
    pub fn advance(self, code: CruiseButton) -> Self {
        Self {
            current: code,
            previous: self.current,
        }
    }

    pub fn edge(self) -> Option<ButtonEdge> {
        if self.current == self.previous || self.previous == CruiseButton::Init {
            return None;
        }
        Some(if self.current == CruiseButton::Unpress {
            ButtonEdge {
                code: self.previous,
                pressed: false,
            }
        } else {
            ButtonEdge {
                code: self.current,
                pressed: true,
            }
        })
    }
}

/// Standardized vehicle state exposed to the generic pipeline.
///
/// `cycle` is 0 before the first update and increments once per translated
/// cycle. `button_events` and `notifications` describe that cycle only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalState {
    pub cycle: u64,
    /// m/s
    pub v_ego: f64,
    pub standstill: bool,
    pub can_valid: bool,
    pub gas_pressed: bool,
    pub park_brake: bool,
    pub stock_controller_faulted: bool,
    pub cruise_state: CruiseState,
    pub cruise_buttons: CruiseButtonHistory,
    pub steering_torque: f64,
    pub steer_warning: bool,
    pub steer_error: bool,
    pub lkas_status: u8,
    pub steering_rate_limited: bool,
    pub button_events: ButtonEvents,
    pub notifications: NotificationSet,
}

impl Default for CanonicalState {
    fn default() -> Self {
        Self {
            cycle: 0,
            v_ego: 0.0,
            standstill: true,
            can_valid: false,
            gas_pressed: false,
            park_brake: false,
            stock_controller_faulted: false,
            cruise_state: CruiseState::default(),
            cruise_buttons: CruiseButtonHistory::default(),
            steering_torque: 0.0,
            steer_warning: false,
            steer_error: false,
            lkas_status: 0,
            steering_rate_limited: false,
            button_events: ButtonEvents::new(),
            notifications: NotificationSet::new(),
        }
    }
}
