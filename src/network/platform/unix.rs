//! Unix address source using `getifaddrs(3)`.

use std::net::{Ipv4Addr, Ipv6Addr};

use nix::ifaddrs::getifaddrs;
use nix::sys::socket::{SockaddrLike, SockaddrStorage};

use crate::network::{AddressRecord, AddressSource, SourceEntry, SourceError};

/// Unix implementation of [`AddressSource`] backed by `getifaddrs`.
///
/// Every call walks the kernel's live interface table; nothing is cached.
///
/// # Example
///
/// ```no_run
/// use ifshow::network::{AddressSource, platform::IfaddrsSource};
///
/// let source = IfaddrsSource::new();
/// for entry in source.entries().expect("getifaddrs failed") {
///     println!("{}", entry.name());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IfaddrsSource {
    _private: (),
}

impl IfaddrsSource {
    /// Creates a new `getifaddrs` source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AddressSource for IfaddrsSource {
    fn entries(&self) -> Result<Vec<SourceEntry>, SourceError> {
        let entries: Vec<SourceEntry> = getifaddrs()?
            .map(|ifaddr| {
                to_entry(
                    ifaddr.interface_name,
                    ifaddr.address.as_ref(),
                    ifaddr.netmask.as_ref(),
                )
            })
            .collect();

        tracing::trace!(count = entries.len(), "Read interface address table");
        Ok(entries)
    }
}

/// Converts one `ifaddrs` node into a [`SourceEntry`].
///
/// A node whose netmask is missing or of a different family gets an all-zero
/// mask (prefix length 0) rather than being dropped.
fn to_entry(
    name: String,
    address: Option<&SockaddrStorage>,
    netmask: Option<&SockaddrStorage>,
) -> SourceEntry {
    let Some(address) = address else {
        return SourceEntry::Other { name };
    };

    if let Some(sin) = address.as_sockaddr_in() {
        let mask = netmask
            .and_then(SockaddrStorage::as_sockaddr_in)
            .map_or(Ipv4Addr::UNSPECIFIED, |m| m.ip());
        return SourceEntry::Address(AddressRecord::v4(name, sin.ip(), mask));
    }

    if let Some(sin6) = address.as_sockaddr_in6() {
        let mask = netmask
            .and_then(SockaddrStorage::as_sockaddr_in6)
            .map_or(Ipv6Addr::UNSPECIFIED, |m| m.ip());
        return SourceEntry::Address(AddressRecord::v6(name, sin6.ip(), mask));
    }

    tracing::trace!(
        interface = %name,
        family = ?address.family(),
        "Skipping non-IP address entry"
    );
    SourceEntry::Other { name }
}
