//! Tonegen CLI - Note Asset Generator
//!
//! Command-line interface for rendering the note clip set.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use tonegen::cli::{commands, Cli, Commands};
use tonegen::ToneError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Tonegen v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            if let Some(tone_err) = err.downcast_ref::<ToneError>() {
                for suggestion in tone_err.recovery_suggestions() {
                    eprintln!("  hint: {}", suggestion);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.load_config().context("Failed to load configuration")?;

    match cli.command {
        None | Some(Commands::Generate) => {
            let report = commands::generate(config, cli.keep_going, cli.manifest.as_deref())?;
            Ok(ExitCode::from(commands::exit_code(&report)))
        }
        Some(Commands::CheckEncoder) => {
            commands::check_encoder(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Render { index, output }) => {
            commands::render(config, index, &output)
                .with_context(|| format!("Failed to render note {}", index))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
