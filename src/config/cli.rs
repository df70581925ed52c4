//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// ifshow: show network interface addresses
///
/// Lists interfaces and their IPv4/IPv6 addresses in CIDR notation,
/// either from this host or from a remote agent.
#[derive(Debug, Parser)]
#[command(name = "ifshow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (local query if omitted)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Show the addresses of one interface
    #[arg(long, short, value_name = "NAME", conflicts_with = "all")]
    pub interface: Option<String>,

    /// Show every interface with its addresses
    #[arg(long, short)]
    pub all: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for ifshow
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve interface queries over TCP
    Agent(AgentArgs),

    /// Query a remote agent
    Remote(RemoteArgs),

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ifshow.toml")]
        output: PathBuf,
    },
}

/// Arguments for `ifshow agent`.
#[derive(Debug, Default, Args)]
pub struct AgentArgs {
    /// Address to listen on, e.g. `[::]:5555` or `0.0.0.0:5555`
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Maximum number of connections served at once
    #[arg(long = "max-connections", value_name = "N")]
    pub max_connections: Option<usize>,

    /// Close connections that have not finished after this many seconds
    #[arg(long = "request-timeout", value_name = "SECS")]
    pub request_timeout: Option<u64>,
}

/// Arguments for `ifshow remote`.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("query").required(true).args(["interface", "all"])))]
pub struct RemoteArgs {
    /// Agent host name or address
    #[arg(long, short = 'n', value_name = "HOST")]
    pub host: String,

    /// Show the addresses of one interface
    #[arg(long, short, value_name = "NAME")]
    pub interface: Option<String>,

    /// Show every interface with its addresses
    #[arg(long, short)]
    pub all: bool,

    /// Agent port
    #[arg(long)]
    pub port: Option<u16>,

    /// Connection timeout in seconds
    #[arg(long = "connect-timeout", value_name = "SECS")]
    pub connect_timeout: Option<u64>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error instead
    /// of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid or conflicting arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if any local-query flag was given.
    #[must_use]
    pub const fn has_local_flags(&self) -> bool {
        self.interface.is_some() || self.all || self.json
    }
}
