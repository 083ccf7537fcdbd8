//! `carportctl replay`

use std::path::Path;

use anyhow::Result;
use carport_interface::{CarInterface, InterfaceConfig};
use carport_profile::VehicleProfileRegistry;
use tracing::debug;

use crate::error::CliError;
use crate::output::{self, CycleReport};
use crate::scenario::Scenario;

pub fn execute(path: &Path, config: &InterfaceConfig, json: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let reports = run(&scenario, config)?;
    output::print_replay(&reports, json)
}

/// Run every cycle of `scenario` through a fresh session.
pub fn run(scenario: &Scenario, config: &InterfaceConfig) -> Result<Vec<CycleReport>, CliError> {
    let fingerprint = scenario.fingerprint(config.interceptor);
    let profile = VehicleProfileRegistry::new(config.interceptor).resolve_id(&scenario.model, &fingerprint);
    let mut session = CarInterface::new(profile, config);

    let mut reports = Vec::with_capacity(scenario.cycles.len());
    for (index, cycle) in scenario.cycles.iter().enumerate() {
        let state = session
            .update(&cycle.signals)
            .map_err(|source| CliError::CycleRejected {
                cycle: index + 1,
                source,
            })?;
        let button_events = state.button_events.to_vec();
        let notifications = state.notifications;
        let gated = session.gated(&cycle.control);
        let messages = session.apply(&cycle.control);
        debug!(cycle = index + 1, messages = messages.len(), "Replayed cycle");

        reports.push(CycleReport {
            cycle: index + 1,
            button_events,
            notifications,
            requested_enabled: cycle.control.enabled,
            enabled: gated.enabled,
            hud_speed: gated.hud_speed,
            messages: messages.len(),
        });
    }
    Ok(reports)
}
