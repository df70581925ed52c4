//! Address source trait and error types.

use super::SourceEntry;
use thiserror::Error;

/// Error type for address enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// Enumeration is never retried by the callers in this crate.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The `getifaddrs` call failed.
    #[cfg(unix)]
    #[error("getifaddrs failed: {0}")]
    Os(#[from] nix::Error),

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for listing the addresses currently configured on the host.
///
/// # Design
///
/// - The kernel's interface table is live, process-wide state; this trait
///   is the seam that lets the collector run against synthetic entries
/// - Platform implementations live in [`platform`](super::platform)
///
/// # Example
///
/// ```
/// use ifshow::network::{AddressSource, SourceEntry, SourceError};
///
/// struct StaticSource(Vec<SourceEntry>);
///
/// impl AddressSource for StaticSource {
///     fn entries(&self) -> Result<Vec<SourceEntry>, SourceError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let source = StaticSource(vec![SourceEntry::other("eth0")]);
/// assert_eq!(source.entries().unwrap().len(), 1);
/// ```
pub trait AddressSource: Send + Sync {
    /// Lists every entry of the host's interface address table.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the underlying OS call fails.
    ///
    /// # Implementation Notes
    ///
    /// - Return ALL entries in the order the OS reports them; filtering and
    ///   deduplication are done by the caller
    /// - Entries of non-IP families must be reported as [`SourceEntry::Other`]
    ///   so that address-less interfaces are still listed
    fn entries(&self) -> Result<Vec<SourceEntry>, SourceError>;
}

impl<T: AddressSource + ?Sized> AddressSource for &T {
    fn entries(&self) -> Result<Vec<SourceEntry>, SourceError> {
        (*self).entries()
    }
}

impl<T: AddressSource + ?Sized> AddressSource for std::sync::Arc<T> {
    fn entries(&self) -> Result<Vec<SourceEntry>, SourceError> {
        self.as_ref().entries()
    }
}
