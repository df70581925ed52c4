//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Agent configuration section
    #[serde(default)]
    pub agent: AgentSection,

    /// Remote client configuration section
    #[serde(default)]
    pub remote: RemoteSection,
}

/// Agent configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    /// Listen address, e.g. `"[::]:5555"`
    pub listen: Option<String>,

    /// Maximum number of connections served at once
    pub max_connections: Option<usize>,

    /// Per-connection timeout in seconds
    pub request_timeout: Option<u64>,
}

/// Remote client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSection {
    /// Agent port
    pub port: Option<u16>,

    /// Connect timeout in seconds
    pub connect_timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ifshow Configuration File
#
# Command-line flags override values set here.

[agent]
# Address to listen on (default: "[::]:5555", dual stack where supported)
listen = "[::]:5555"

# Maximum number of connections served at once (default: 64)
max_connections = 64

# Close connections that have not finished after this many seconds
# (default: no timeout)
# request_timeout = 30

[remote]
# Agent port (default: 5555)
port = 5555

# Connection timeout in seconds (default: 10)
connect_timeout = 10
"#
    .to_string()
}
