//! Interface inventory: prefix lengths and per-interface grouping.
//!
//! This module provides:
//! - Prefix length calculation from netmasks ([`prefix_length`])
//! - Grouping of raw address entries by interface ([`collect`])
//! - The grouped result types ([`InterfaceGroup`], [`EnumerationResult`])
//! - The query error type ([`InventoryError`])

mod collector;
mod error;
mod group;
mod prefix;

pub use collector::collect;
pub use error::InventoryError;
pub use group::{EnumerationResult, InterfaceGroup};
pub use prefix::prefix_length;
