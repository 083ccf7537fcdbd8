//! `carportctl profile`

use anyhow::Result;
use carport_interface::InterfaceConfig;
use carport_profile::{CarModel, Fingerprint, VehicleProfileRegistry};
use tracing::info;

use crate::error::CliError;
use crate::output;

pub fn execute(
    model_id: &str,
    interceptor: bool,
    strict: bool,
    config: &InterfaceConfig,
    json: bool,
) -> Result<()> {
    if strict && model_id.parse::<CarModel>().is_err() {
        return Err(CliError::UnsupportedModel(model_id.to_string()).into());
    }

    let fingerprint = if interceptor {
        Fingerprint::new().with_message(config.interceptor.bus, config.interceptor.address, 6)
    } else {
        Fingerprint::new()
    };
    let registry = VehicleProfileRegistry::new(config.interceptor);
    let profile = registry.resolve_id(model_id, &fingerprint);
    info!(model = %profile.model(), "Printing profile");

    output::print_profile(&profile, json)
}
