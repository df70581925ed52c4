//! Error type for interface queries.

use thiserror::Error;

use crate::network::SourceError;

/// Error type for collecting and querying interfaces.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A name filter was given and no IPv4/IPv6 entry carried that name.
    #[error("Interface '{name}' not found")]
    NotFound {
        /// The requested interface name
        name: String,
    },

    /// Listing the host's addresses failed.
    #[error("Failed to enumerate interface addresses: {0}")]
    Source(#[from] SourceError),
}

impl InventoryError {
    /// Creates a `NotFound` error for the given interface name.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns true if this is a `NotFound` error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
