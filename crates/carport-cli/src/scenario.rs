//! Recorded cycle scenarios for `carportctl replay`.

use std::path::Path;

use carport_interface::{CarControl, DecodedSignals};
use carport_profile::Fingerprint;
use serde::Deserialize;

use crate::error::CliError;

/// A model, the fingerprint seen at session start, and the cycles to run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub model: String,
    /// Shorthand for a fingerprint holding only the interceptor message.
    #[serde(default)]
    pub interceptor: bool,
    #[serde(default)]
    pub fingerprint: Option<Fingerprint>,
    pub cycles: Vec<Cycle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cycle {
    #[serde(default)]
    pub signals: DecodedSignals,
    #[serde(default)]
    pub control: CarControl,
}

impl Scenario {
    pub fn from_yaml_str(input: &str) -> Result<Self, CliError> {
        let scenario: Self = serde_yaml::from_str(input)?;
        if scenario.cycles.is_empty() {
            return Err(CliError::InvalidScenario("no cycles".to_string()));
        }
        if scenario.interceptor && scenario.fingerprint.is_some() {
            return Err(CliError::InvalidScenario(
                "'interceptor' and 'fingerprint' are mutually exclusive".to_string(),
            ));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Fingerprint for the session, given the configured interceptor address.
    pub fn fingerprint(&self, interceptor: carport_profile::SignalAddress) -> Fingerprint {
        match &self.fingerprint {
            Some(fp) => fp.clone(),
            None if self.interceptor => {
                Fingerprint::new().with_message(interceptor.bus, interceptor.address, 6)
            }
            None => Fingerprint::new(),
        }
    }
}
