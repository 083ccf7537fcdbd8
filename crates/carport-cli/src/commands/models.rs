//! `carportctl models`

use anyhow::Result;
use carport_profile::CarModel;

use crate::output;

pub fn execute(json: bool) -> Result<()> {
    output::print_models(&CarModel::SUPPORTED, json)
}
