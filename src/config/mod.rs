//! Configuration layer for ifshow.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`], [`Mode`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! What to query (`-i`, `-a`, remote `-n`) is CLI-only; the config file only
//! carries agent and remote-client tuning.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{AgentArgs, Cli, Command, RemoteArgs};
pub use error::{ConfigError, field};
pub use toml::{AgentSection, RemoteSection, TomlConfig, default_config_template};
pub use validated::{
    AgentSettings, LocalQuery, Mode, QueryTarget, RemoteSettings, ValidatedConfig,
    write_default_config,
};
