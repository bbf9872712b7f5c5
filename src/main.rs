//! Binary entry point for the model generator.
//!
//! The command logic lives in `symbolon::app`, so this binary only installs
//! logging, delegates to the library and maps failures to exit codes.

use std::process::ExitCode;

use symbolon::app::{self, USAGE_EXIT_CODE, UsageError};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<UsageError>() => {
            error!("{err}");
            ExitCode::from(USAGE_EXIT_CODE)
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
