//! ifshow: network interface address inspection
//!
//! Entry point for the ifshow application.

use ifshow::config::{Cli, ValidatedConfig};
use std::process::ExitCode;

mod app;
mod run;

use app::{default_level, exit_code, print_config_hint, report_run_error, setup_tracing};

/// Main entry point.
///
/// Every mode, `init` included, goes through configuration validation and
/// then [`run::execute`].
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose, default_level(&config.mode));
    tracing::info!(mode = config.mode.name(), "{config}");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            report_run_error(&e);
            exit_code::for_run_error(&e)
        }
    }
}
