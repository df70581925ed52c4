//! Interface groups and the enumeration result.

use crate::network::AddressRecord;

/// The addresses of one interface, in discovery order.
///
/// Every record in `addresses` has `interface() == name`; groups are only
/// built by the collector, which upholds this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceGroup {
    name: String,
    addresses: Vec<AddressRecord>,
}

impl InterfaceGroup {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addresses: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: AddressRecord) {
        debug_assert_eq!(record.interface(), self.name);
        self.addresses.push(record);
    }

    /// Interface name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Addresses configured on the interface.
    #[must_use]
    pub fn addresses(&self) -> &[AddressRecord] {
        &self.addresses
    }

    /// Returns true if the interface has at least one IPv4/IPv6 address.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }
}

/// Interfaces of one enumeration pass, each name exactly once, in the order
/// the address source first reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationResult {
    groups: Vec<InterfaceGroup>,
}

impl EnumerationResult {
    pub(crate) const fn from_groups(groups: Vec<InterfaceGroup>) -> Self {
        Self { groups }
    }

    /// All groups in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[InterfaceGroup] {
        &self.groups
    }

    /// Interface names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(InterfaceGroup::name)
    }

    /// Every address record, group by group.
    pub fn records(&self) -> impl Iterator<Item = &AddressRecord> {
        self.groups.iter().flat_map(|group| group.addresses.iter())
    }

    /// Looks up a group by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InterfaceGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Number of interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no interface was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
