//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::protocol::Request;

use super::cli::{AgentArgs, Cli, Command, RemoteArgs};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// What a local query shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// Interface names only (no `-i`/`-a`)
    Names,
    /// One interface's addresses (`-i NAME`)
    Interface(String),
    /// Every interface with its addresses (`-a`)
    All,
}

/// Settings for a query against this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalQuery {
    /// What to show
    pub target: QueryTarget,
    /// Render as JSON instead of text lines
    pub json: bool,
}

/// Settings for the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    /// Address to bind
    pub listen: SocketAddr,
    /// Maximum concurrent connections
    pub max_connections: usize,
    /// Per-connection timeout, `None` to wait indefinitely
    pub request_timeout: Option<Duration>,
}

/// Settings for a query against a remote agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    /// Agent host name or address
    pub host: String,
    /// Agent port
    pub port: u16,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request to send
    pub request: Request,
}

/// The run mode selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Query this host
    Local(LocalQuery),
    /// Serve queries over TCP
    Agent(AgentSettings),
    /// Query a remote agent
    Remote(RemoteSettings),
    /// Write a configuration template to the given path
    Init(PathBuf),
}

impl Mode {
    /// Short name of the mode, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Agent(_) => "agent",
            Self::Remote(_) => "remote",
            Self::Init(_) => "init",
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Run mode and its settings
    pub mode: Mode,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            Mode::Local(query) => write!(
                f,
                "Config {{ mode: local, target: {:?}, json: {} }}",
                query.target, query.json
            ),
            Mode::Agent(agent) => {
                let timeout = agent
                    .request_timeout
                    .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));
                write!(
                    f,
                    "Config {{ mode: agent, listen: {}, max_connections: {}, request_timeout: {} }}",
                    agent.listen, agent.max_connections, timeout
                )
            }
            Mode::Remote(remote) => write!(
                f,
                "Config {{ mode: remote, host: {}, port: {}, connect_timeout: {}s, request: {} }}",
                remote.host,
                remote.port,
                remote.connect_timeout.as_secs(),
                remote.request
            ),
            Mode::Init(output) => write!(f, "Config {{ mode: init, output: {} }}", output.display()),
        }
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Local query flags are combined with a subcommand
    /// - The listen address is invalid
    /// - The connection limit, port, or a timeout is zero
    /// - The connection limit exceeds what the agent can track
    /// - The remote interface name cannot be sent as one request token
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        if cli.command.is_some() && cli.has_local_flags() {
            return Err(ConfigError::Conflict(
                "-i/--interface, -a/--all and --json apply to local queries only".to_string(),
            ));
        }

        let mode = match &cli.command {
            None => Mode::Local(Self::resolve_local(cli)),
            Some(Command::Agent(args)) => Mode::Agent(Self::resolve_agent(args, toml)?),
            Some(Command::Remote(args)) => Mode::Remote(Self::resolve_remote(args, toml)?),
            Some(Command::Init { output }) => Mode::Init(output.clone()),
        };

        Ok(Self {
            mode,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. `init`
    /// never reads it, so a template can be written where none exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if cli.is_init() {
            None
        } else if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_local(cli: &Cli) -> LocalQuery {
        let target = match (&cli.interface, cli.all) {
            (Some(name), _) => QueryTarget::Interface(name.clone()),
            (None, true) => QueryTarget::All,
            (None, false) => QueryTarget::Names,
        };

        LocalQuery {
            target,
            json: cli.json,
        }
    }

    fn resolve_agent(
        args: &AgentArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<AgentSettings, ConfigError> {
        let section = toml.map(|t| &t.agent);

        // Priority: CLI explicit > TOML > default
        let listen_str = args
            .listen
            .as_deref()
            .or_else(|| section.and_then(|s| s.listen.as_deref()))
            .unwrap_or(defaults::LISTEN);

        let listen = listen_str
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddress {
                value: listen_str.to_string(),
                source,
            })?;

        let max_connections = args
            .max_connections
            .or_else(|| section.and_then(|s| s.max_connections))
            .unwrap_or(defaults::MAX_CONNECTIONS);

        if max_connections == 0 {
            return Err(ConfigError::InvalidLimit {
                field: field::MAX_CONNECTIONS,
                reason: "must be greater than 0".to_string(),
            });
        }

        if max_connections > Semaphore::MAX_PERMITS {
            return Err(ConfigError::InvalidLimit {
                field: field::MAX_CONNECTIONS,
                reason: format!("must be at most {}", Semaphore::MAX_PERMITS),
            });
        }

        let request_timeout = args
            .request_timeout
            .or_else(|| section.and_then(|s| s.request_timeout))
            .map(|secs| positive_duration(secs, field::REQUEST_TIMEOUT))
            .transpose()?;

        Ok(AgentSettings {
            listen,
            max_connections,
            request_timeout,
        })
    }

    fn resolve_remote(
        args: &RemoteArgs,
        toml: Option<&TomlConfig>,
    ) -> Result<RemoteSettings, ConfigError> {
        let section = toml.map(|t| &t.remote);

        let port = args
            .port
            .or_else(|| section.and_then(|s| s.port))
            .unwrap_or(defaults::PORT);

        if port == 0 {
            return Err(ConfigError::InvalidLimit {
                field: field::PORT,
                reason: "must be greater than 0".to_string(),
            });
        }

        let connect_timeout = positive_duration(
            args.connect_timeout
                .or_else(|| section.and_then(|s| s.connect_timeout))
                .unwrap_or(defaults::CONNECT_TIMEOUT_SECS),
            field::CONNECT_TIMEOUT,
        )?;

        // clap's argument group guarantees one of the two is present.
        let request = match (&args.interface, args.all) {
            (Some(name), false) => Request::interface(name.as_str()).map_err(|source| {
                ConfigError::InvalidInterfaceName {
                    name: name.clone(),
                    source,
                }
            })?,
            (None, true) => Request::All,
            _ => {
                return Err(ConfigError::Conflict(
                    "exactly one of -i/--interface or -a/--all is required".to_string(),
                ));
            }
        };

        Ok(RemoteSettings {
            host: args.host.clone(),
            port,
            connect_timeout,
            request,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn positive_duration(seconds: u64, field: &'static str) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::zero_duration(field));
    }
    Ok(Duration::from_secs(seconds))
}
