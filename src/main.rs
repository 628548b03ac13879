//! linode-ddns: dynamic DNS for Linode-hosted zones
//!
//! Entry point for the linode-ddns application.

use linode_ddns::config::{Cli, RuntimeOptions};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, setup_tracing, until_interrupted};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.debug);

    let options = RuntimeOptions::from_env();
    tracing::debug!("Provider updates: {}", options.commit);

    run_application(&cli, options)
}

/// Runs one invocation on a current-thread runtime, aborting on Ctrl-C.
///
/// Excluded from coverage - requires async runtime and signal handling.
#[cfg(not(tarpaulin_include))]
fn run_application(cli: &Cli, options: RuntimeOptions) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("FAILED: {e}");
            return exit_code::FAILURE;
        }
    };

    let code = runtime.block_on(until_interrupted(
        run::launch(cli, options),
        tokio::signal::ctrl_c(),
    ));

    // A prompt may still be waiting on stdin; don't wait for it.
    runtime.shutdown_background();
    code
}
