//! Core network types for interface address representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::Serialize;

use crate::inventory::prefix_length;

/// Address family of an interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressFamily {
    /// IPv4 (`AF_INET`).
    V4,
    /// IPv6 (`AF_INET6`).
    V6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// One IPv4 or IPv6 address configured on an interface, with its netmask.
///
/// Address and netmask always belong to the same family; the only way to
/// build a record is through [`AddressRecord::v4`] or [`AddressRecord::v6`].
///
/// `Display` renders the CIDR form used on every output path,
/// e.g. `10.0.0.1/24` or `fe80::1/64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    interface: String,
    address: IpAddr,
    netmask: IpAddr,
}

impl AddressRecord {
    /// Creates an IPv4 record.
    #[must_use]
    pub fn v4(interface: impl Into<String>, address: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            interface: interface.into(),
            address: IpAddr::V4(address),
            netmask: IpAddr::V4(netmask),
        }
    }

    /// Creates an IPv6 record.
    #[must_use]
    pub fn v6(interface: impl Into<String>, address: Ipv6Addr, netmask: Ipv6Addr) -> Self {
        Self {
            interface: interface.into(),
            address: IpAddr::V6(address),
            netmask: IpAddr::V6(netmask),
        }
    }

    /// Name of the interface owning this address.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The configured address.
    #[must_use]
    pub const fn address(&self) -> IpAddr {
        self.address
    }

    /// The network mask paired with the address.
    #[must_use]
    pub const fn netmask(&self) -> IpAddr {
        self.netmask
    }

    /// Address family of this record.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        match self.address {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    /// Prefix length derived from the netmask.
    ///
    /// Counting stops at the first clear bit, so a non-contiguous mask
    /// yields the length of its leading run only.
    #[must_use]
    pub fn prefix_len(&self) -> u32 {
        match self.netmask {
            IpAddr::V4(mask) => prefix_length(&mask.octets()),
            IpAddr::V6(mask) => prefix_length(&mask.octets()),
        }
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len())
    }
}

/// A single raw entry reported by an [`AddressSource`](super::AddressSource).
///
/// The OS lists one entry per (interface, address) pair, including entries
/// of families other than IPv4/IPv6 (link-layer, for instance). Those are kept
/// as [`SourceEntry::Other`] because they still reveal that an interface
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEntry {
    /// An IPv4 or IPv6 address.
    Address(AddressRecord),
    /// An entry of any other family, or one without an address.
    Other {
        /// Interface name.
        name: String,
    },
}

impl SourceEntry {
    /// Creates an entry that carries no IP address.
    #[must_use]
    pub fn other(name: impl Into<String>) -> Self {
        Self::Other { name: name.into() }
    }

    /// Name of the interface this entry belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Address(record) => record.interface(),
            Self::Other { name } => name,
        }
    }

    /// Consumes the entry and returns its address record, if any.
    #[must_use]
    pub fn into_record(self) -> Option<AddressRecord> {
        match self {
            Self::Address(record) => Some(record),
            Self::Other { .. } => None,
        }
    }
}

impl From<AddressRecord> for SourceEntry {
    fn from(record: AddressRecord) -> Self {
        Self::Address(record)
    }
}
