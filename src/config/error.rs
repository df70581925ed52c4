//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The agent listen address is not a valid socket address.
    #[error("Invalid listen address '{value}': {source}")]
    InvalidListenAddress {
        /// The value provided
        value: String,
        /// Underlying parse error
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric limit is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidLimit {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The interface name cannot be sent to an agent.
    #[error("Invalid interface name '{name}': {source}")]
    InvalidInterfaceName {
        /// The name provided
        name: String,
        /// Why the request could not be built
        #[source]
        source: crate::protocol::RequestError,
    },

    /// Flags that cannot be combined.
    #[error("Conflicting options: {0}")]
    Conflict(String),
}

/// Well-known field names used in validation errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The agent listen address.
    pub const LISTEN: &str = "agent.listen";
    /// The agent connection limit.
    pub const MAX_CONNECTIONS: &str = "agent.max_connections";
    /// The agent per-connection timeout.
    pub const REQUEST_TIMEOUT: &str = "agent.request_timeout";
    /// The remote agent port.
    pub const PORT: &str = "remote.port";
    /// The remote connect timeout.
    pub const CONNECT_TIMEOUT: &str = "remote.connect_timeout";
}

impl ConfigError {
    /// Creates an `InvalidDuration` error for a zero timeout.
    #[must_use]
    pub fn zero_duration(field: &'static str) -> Self {
        Self::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        }
    }
}
