//! Decoded bus signals for one control cycle.
//!
//! The bus decoder is external; this module only gives its output a typed
//! shape. Raw codes keep their numeric wire values so unknown codes survive
//! translation instead of being rejected.

use serde::{Deserialize, Serialize};

/// Cruise stalk button code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CruiseButton {
    /// Session-start sentinel, never reported by the bus decoder.
    Init,
    #[default]
    Unpress,
    ResAccel,
    DecelSet,
    Main,
    Cancel,
    Other(u8),
}

impl CruiseButton {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Init,
            1 => Self::Unpress,
            2 => Self::ResAccel,
            3 => Self::DecelSet,
            5 => Self::Main,
            6 => Self::Cancel,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Init => 0,
            Self::Unpress => 1,
            Self::ResAccel => 2,
            Self::DecelSet => 3,
            Self::Main => 5,
            Self::Cancel => 6,
            Self::Other(raw) => raw,
        }
    }
}

impl From<u8> for CruiseButton {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

impl From<CruiseButton> for u8 {
    fn from(button: CruiseButton) -> Self {
        button.raw()
    }
}

/// Factory adaptive cruise module status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum AccState {
    #[default]
    Off,
    Active,
    Faulted,
    Standstill,
    Other(u8),
}

impl AccState {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::Active,
            3 => Self::Faulted,
            4 => Self::Standstill,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Active => 1,
            Self::Faulted => 3,
            Self::Standstill => 4,
            Self::Other(raw) => raw,
        }
    }
}

impl From<u8> for AccState {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

impl From<AccState> for u8 {
    fn from(state: AccState) -> Self {
        state.raw()
    }
}

/// One cycle of decoded signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodedSignals {
    /// Vehicle speed, m/s.
    pub v_ego: f64,
    pub standstill: bool,
    pub can_valid: bool,
    pub cruise_buttons: CruiseButton,
    pub acc_state: AccState,
    pub park_brake: bool,
    pub gas_pressed: bool,
    /// Driver torque on the steering column.
    pub steering_torque: f64,
    pub steer_warning: bool,
    pub steer_error: bool,
    /// Lane keeping assist status reported by the steering rack.
    pub lkas_status: u8,
}

impl Default for DecodedSignals {
    fn default() -> Self {
        Self {
            v_ego: 0.0,
            standstill: true,
            can_valid: true,
            cruise_buttons: CruiseButton::Unpress,
            acc_state: AccState::Off,
            park_brake: false,
            gas_pressed: false,
            steering_torque: 0.0,
            steer_warning: false,
            steer_error: false,
            lkas_status: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_raw_codes() {
        for raw in 0..=u8::MAX {
            assert_eq!(CruiseButton::from_raw(raw).raw(), raw);
            assert_eq!(AccState::from_raw(raw).raw(), raw);
        }
        assert_eq!(CruiseButton::from_raw(4), CruiseButton::Other(4));
        assert_eq!(AccState::from_raw(2), AccState::Other(2));
    }

    #[test]
    fn test_signals_deserialize_with_raw_codes() -> Result<(), Box<dyn std::error::Error>> {
        let signals: DecodedSignals =
            serde_json::from_str(r#"{"v_ego": 12.5, "cruise_buttons": 6, "acc_state": 3}"#)?;
        assert_eq!(signals.cruise_buttons, CruiseButton::Cancel);
        assert_eq!(signals.acc_state, AccState::Faulted);
        assert!(signals.can_valid);
        Ok(())
    }
}
