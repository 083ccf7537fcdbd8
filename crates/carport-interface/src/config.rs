//! Session configuration.

use std::path::Path;

use carport_errors::{CarportError, Result, ValidationError, validate};
use carport_profile::{GAS_INTERCEPTOR, SignalAddress};
use serde::{Deserialize, Serialize};

use crate::gate::DEFAULT_HUD_SPEED_CEILING;

/// Control loop period, seconds.
pub const DEFAULT_CONTROL_PERIOD: f64 = 0.01;

/// Settings of one interface session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    /// HUD speed targets above this are replaced with 0.
    pub hud_speed_ceiling: f64,
    /// Fingerprint message that reveals a pedal interceptor.
    pub interceptor: SignalAddress,
    /// Seconds per control frame.
    pub control_period: f64,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            hud_speed_ceiling: DEFAULT_HUD_SPEED_CEILING,
            interceptor: GAS_INTERCEPTOR,
            control_period: DEFAULT_CONTROL_PERIOD,
        }
    }
}

impl InterfaceConfig {
    /// # Errors
    ///
    /// Returns [`CarportError::Config`] on malformed YAML, or a validation
    /// error.
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)
            .map_err(|e| CarportError::config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`CarportError::Config`] on malformed JSON, or a validation
    /// error.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| CarportError::config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or YAML for any other extension.
    ///
    /// # Errors
    ///
    /// Returns [`CarportError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CarportError::config(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError`] for a non-finite or non-positive ceiling
    /// or period.
    pub fn validate(&self) -> Result<()> {
        validate!(
            self.hud_speed_ceiling.is_finite(),
            ValidationError::not_finite("hud_speed_ceiling")
        );
        validate!(
            self.hud_speed_ceiling > 0.0,
            ValidationError::not_positive("hud_speed_ceiling", self.hud_speed_ceiling)
        );
        validate!(
            self.control_period.is_finite(),
            ValidationError::not_finite("control_period")
        );
        validate!(
            self.control_period > 0.0 && self.control_period <= 1.0,
            ValidationError::out_of_range("control_period", self.control_period, 0.0, 1.0)
        );
        Ok(())
    }
}
