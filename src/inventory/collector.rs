//! Interface collection: one pass over the address source.

use std::collections::HashMap;

use crate::network::{AddressSource, SourceEntry};

use super::{EnumerationResult, InterfaceGroup, InventoryError};

/// Reads the address source once and groups its entries by interface.
///
/// - Entries with an empty name are skipped
/// - With `filter`, only entries whose name equals it exactly are kept
/// - Names are deduplicated in first-seen order; entries without an IP address
///   still register their interface, with no address
///
/// # Errors
///
/// - [`InventoryError::Source`] if the source fails (not retried)
/// - [`InventoryError::NotFound`] if `filter` is set and no IPv4/IPv6 entry
///   matched it
pub fn collect<S: AddressSource + ?Sized>(
    source: &S,
    filter: Option<&str>,
) -> Result<EnumerationResult, InventoryError> {
    let entries = source.entries()?;

    let mut groups: Vec<InterfaceGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut matched_records = 0usize;

    for entry in entries {
        if entry.name().is_empty() {
            continue;
        }
        if filter.is_some_and(|wanted| entry.name() != wanted) {
            continue;
        }

        let slot = match index.get(entry.name()) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                groups.push(InterfaceGroup::new(entry.name()));
                index.insert(entry.name().to_string(), slot);
                slot
            }
        };

        if let SourceEntry::Address(record) = entry {
            groups[slot].push(record);
            matched_records += 1;
        }
    }

    if let Some(name) = filter {
        if matched_records == 0 {
            return Err(InventoryError::not_found(name));
        }
    }

    tracing::debug!(
        interfaces = groups.len(),
        addresses = matched_records,
        filter = filter.unwrap_or("*"),
        "Collected interfaces"
    );

    Ok(EnumerationResult::from_groups(groups))
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
