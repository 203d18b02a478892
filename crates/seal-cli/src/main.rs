//! `seal`: command-line entry point for Secure Cell Seal mode.
//!
//! Startup sequence:
//! 1. Parse arguments and load [`config::Config`] from `SEAL_*` environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Run the subcommand over stdin/stdout and map failures to exit codes.

mod commands;
mod config;
mod telemetry;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use common::CellError;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "seal")]
#[command(about = "Seal and open data with Secure Cell")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: seal configuration invalid: {e:#}");
            return ExitCode::from(2);
        }
    };

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level) {
        eprintln!("ERROR: {e:#}");
        return ExitCode::FAILURE;
    }

    // -----------------------------------------------------------------------
    // 3. Command
    // -----------------------------------------------------------------------
    match commands::run(&args.command, &cfg, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = commands::exit_code(&e);
            let opaque = e
                .downcast_ref::<CellError>()
                .is_some_and(CellError::is_secure_cell_failure);
            error!(exit_code = code, secure_cell_failure = opaque, "seal command failed");
            eprintln!("ERROR: {e:#}");
            ExitCode::from(code)
        }
    }
}
