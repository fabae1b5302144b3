//! JSON log output.
//!
//! Stdout is the game screen, so logs are written to a file instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Installs the global subscriber, appending JSON lines to `path`.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// Returns `AppError::Config` if the log file cannot be opened or a
/// subscriber is already installed.
pub fn init(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Config(format!("cannot open log file {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::Config(format!("cannot install logger: {e}")))
}
