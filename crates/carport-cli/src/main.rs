//! carportctl - vehicle interface inspection CLI
//!
//! Lists the supported models, prints resolved vehicle profiles and replays
//! recorded cycle scenarios through an interface session.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use carport_interface::InterfaceConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "carportctl")]
#[command(about = "Inspect vehicle profiles and replay interface cycles")]
#[command(version)]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(long, global = true, help = "Output in JSON format for machine parsing")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Interface configuration file (YAML or JSON)
    #[arg(long, global = true, env = "CARPORT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported model ids
    Models,

    /// Print the resolved profile of a model
    Profile {
        /// Canonical model id or tag
        model: String,
        /// Resolve as if a pedal interceptor was fingerprinted
        #[arg(long)]
        interceptor: bool,
        /// Fail instead of falling back to the baseline profile
        #[arg(long)]
        strict: bool,
    },

    /// Replay a YAML scenario of decoded signals and control commands
    Replay {
        /// Scenario file
        scenario: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("carportctl={log_level},carport_profile={log_level},carport_interface={log_level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let result = execute_command(&cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            ExitCode::from(e.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<InterfaceConfig> {
    match path {
        Some(path) => Ok(InterfaceConfig::load(path).map_err(CliError::from)?),
        None => Ok(InterfaceConfig::default()),
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    match &cli.command {
        Commands::Models => commands::models::execute(cli.json),
        Commands::Profile {
            model,
            interceptor,
            strict,
        } => commands::profile::execute(model, *interceptor, *strict, &config, cli.json),
        Commands::Replay { scenario } => commands::replay::execute(scenario, &config, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_models_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["carportctl", "models"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Models));
        Ok(())
    }

    #[test]
    fn parse_profile_flags() -> TestResult {
        let cli = Cli::try_parse_from([
            "carportctl",
            "--json",
            "-vv",
            "profile",
            "CHEVROLET BOLT EV NO ACC",
            "--interceptor",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Profile {
                model,
                interceptor,
                strict,
            } => {
                assert_eq!(model, "CHEVROLET BOLT EV NO ACC");
                assert!(interceptor);
                assert!(!strict);
            }
            _ => return Err("expected profile command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_replay_path() -> TestResult {
        let cli = Cli::try_parse_from(["carportctl", "replay", "trace.yaml", "--json"])?;
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Replay { ref scenario } if scenario == &PathBuf::from("trace.yaml")));
        Ok(())
    }

    #[test]
    fn profile_requires_model() {
        assert!(Cli::try_parse_from(["carportctl", "profile"]).is_err());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::UnsupportedModel("x".into()).exit_code(), 3);
        assert_eq!(CliError::InvalidScenario("x".into()).exit_code(), 4);
    }
}
