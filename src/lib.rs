//! ifshow: network interface address inspection
//!
//! A library for listing a host's network interfaces with their IPv4/IPv6
//! addresses in CIDR notation, and for serving the same data to remote peers
//! over a line-based TCP protocol.

pub mod config;
pub mod format;
pub mod inventory;
pub mod network;
pub mod protocol;
pub mod query;
