//! Labyrinth entry point.

use std::process::ExitCode;

use clap::Parser;
use labyrinth_cli::config::Settings;
use labyrinth_cli::{logging, session};

fn main() -> ExitCode {
    let settings = Settings::parse();
    if let Err(err) = logging::init(&settings.log_file) {
        eprintln!("labyrinth: {err}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Starting Labyrinth");
    match session::run_session(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("labyrinth: {err}");
            ExitCode::FAILURE
        }
    }
}
