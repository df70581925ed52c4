//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use ifshow::config::{ConfigError, Mode};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, unreadable config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - interface not found, bind failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Exit code for a failed run: configuration failures (such as an
    /// unwritable `init` target) keep code 1, everything else is 2.
    pub fn for_run_error(error: &crate::run::RunError) -> ExitCode {
        if error.is_config_error() {
            CONFIG_ERROR
        } else {
            runtime_error()
        }
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'ifshow init' to generate a configuration template.");
        }
        ConfigError::InvalidListenAddress { .. } => {
            eprintln!("\nUse an IP address and port, e.g. '[::]:5555' or '0.0.0.0:5555'.");
        }
        _ => {}
    }
}

/// Reports a runtime failure on stderr.
///
/// A missing interface is printed as a plain diagnostic, as is a failed
/// `init`; everything else goes through the error log.
pub fn report_run_error(error: &RunError) {
    if error.is_not_found() {
        eprintln!("{error}");
    } else if error.is_config_error() {
        eprintln!("Error: {error}");
    } else {
        tracing::error!("{error}");
    }
}

/// Default log level for a run mode when `-v` is not given.
///
/// Queries and `init` stay quiet so stderr only carries problems; the
/// agent reports its lifecycle.
#[must_use]
pub const fn default_level(mode: &Mode) -> Level {
    match mode {
        Mode::Agent(_) => Level::INFO,
        Mode::Local(_) | Mode::Remote(_) | Mode::Init(_) => Level::WARN,
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr; stdout carries only query output.
pub fn setup_tracing(verbose: bool, default: Level) {
    let level = if verbose { Level::DEBUG } else { default };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
