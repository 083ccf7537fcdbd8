//! Error types for carportctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Cycle {cycle} rejected: {source}")]
    CycleRejected {
        cycle: usize,
        #[source]
        source: carport_errors::InvariantError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] carport_errors::CarportError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::UnsupportedModel(_) => 3,
            CliError::InvalidScenario(_)
            | CliError::InvalidConfiguration(_)
            | CliError::JsonError(_)
            | CliError::YamlError(_) => 4,
            CliError::CycleRejected { .. } => 5,
            CliError::IoError(_) => 1,
        }
    }
}
