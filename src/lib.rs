pub mod calendar;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod notifications;
pub mod plan;
pub mod planner;
pub mod state;

pub use error::{ErrorKind, PlannerError};
pub use planner::Planner;

#[cfg(test)]
#[path = "../tests/unit/mod.rs"]
mod unit_tests;

use std::process::ExitCode;
use clap::Parser;

/// Process entry point: parse arguments, load config, run one command.
pub fn run() -> ExitCode {
    let cli = cli::Cli::parse();

    let mut config = match config::PlannerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = cli.state.clone() {
        config.storage.state_path = Some(path);
    }

    // Initialize structured logging first
    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("warning: {}", e);
    }
    tracing::debug!(command = ?std::env::args().nth(1), "study planner starting");

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(cli::execute(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, kind = %e.kind, "Command failed");
            eprintln!("error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
