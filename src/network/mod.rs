//! Network layer: the host's interface address table.
//!
//! This module provides types and traits for:
//! - Representing interface addresses ([`AddressRecord`], [`AddressFamily`])
//! - Raw entries as reported by the OS ([`SourceEntry`])
//! - Listing those entries ([`AddressSource`])
//! - Platform-specific implementations ([`platform`])

mod address;
pub mod platform;
mod source;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use address::{AddressFamily, AddressRecord, SourceEntry};
pub use source::{AddressSource, SourceError};
