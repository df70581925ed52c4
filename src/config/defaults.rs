//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::protocol::DEFAULT_PORT;

/// Default agent listen address (dual stack where the OS allows it).
pub const LISTEN: &str = "[::]:5555";

/// Default maximum number of concurrently served connections.
pub const MAX_CONNECTIONS: usize = 64;

/// Default agent port for remote queries.
pub const PORT: u16 = DEFAULT_PORT;

/// Default connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default connect timeout as Duration.
#[must_use]
pub const fn connect_timeout() -> Duration {
    Duration::from_secs(CONNECT_TIMEOUT_SECS)
}
