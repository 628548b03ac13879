//! Application startup and utilities.
//!
//! This module contains exit codes, interrupt handling and tracing setup
//! that support the main entry point.

use std::future::Future;
use std::io;
use std::process::ExitCode;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0), including runs that had nothing to do.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Any fatal error (exit code 1).
    pub const FAILURE: ExitCode = ExitCode::FAILURE;
}

/// Sets up the tracing subscriber for diagnostics on stderr.
///
/// Only warnings show by default so an uneventful scheduled run stays silent.
pub fn setup_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs `work` to completion unless `interrupt` fires first.
///
/// The interrupt is polled before any work starts so a signal handler is in
/// place from the first prompt on. An interrupt prints `Aborted` on stderr
/// and yields the failure code. An interrupt source that fails to register
/// is ignored.
pub async fn until_interrupted<W, I>(work: W, interrupt: I) -> ExitCode
where
    W: Future<Output = ExitCode>,
    I: Future<Output = io::Result<()>>,
{
    tokio::select! {
        biased;
        Ok(()) = interrupt => {
            eprintln!("Aborted");
            exit_code::FAILURE
        }
        code = work => code,
    }
}
