//! Shared test fixtures for code that consumes an [`AddressSource`].

use crate::network::{AddressRecord, AddressSource, SourceEntry, SourceError};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source that returns the same entries on every call and counts calls.
pub struct StaticSource {
    entries: Vec<SourceEntry>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(entries: Vec<SourceEntry>) -> Self {
        Self {
            entries,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AddressSource for StaticSource {
    fn entries(&self) -> Result<Vec<SourceEntry>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }
}

/// Mock source that returns predefined results, one per call.
pub struct MockSource {
    results: Mutex<VecDeque<Result<Vec<SourceEntry>, SourceError>>>,
}

impl MockSource {
    pub fn new(results: Vec<Result<Vec<SourceEntry>, SourceError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(SourceError::Platform {
            message: message.to_string(),
        })])
    }
}

impl AddressSource for MockSource {
    fn entries(&self) -> Result<Vec<SourceEntry>, SourceError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }
}

/// IPv4 entry from string literals.
pub fn v4(name: &str, address: &str, netmask: &str) -> SourceEntry {
    AddressRecord::v4(name, address.parse().unwrap(), netmask.parse().unwrap()).into()
}

/// IPv6 entry from string literals.
pub fn v6(name: &str, address: &str, netmask: &str) -> SourceEntry {
    AddressRecord::v6(name, address.parse().unwrap(), netmask.parse().unwrap()).into()
}

/// A typical Linux host: loopback, one ethernet NIC, and a down interface
/// that only has a link-layer entry.
pub fn typical_host() -> Vec<SourceEntry> {
    vec![
        SourceEntry::other("lo"),
        SourceEntry::other("eth0"),
        SourceEntry::other("docker0"),
        v4("lo", "127.0.0.1", "255.0.0.0"),
        v4("eth0", "192.168.1.10", "255.255.255.0"),
        v6("lo", "::1", "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
        v6("eth0", "fe80::a00:27ff:fe4e:66a1", "ffff:ffff:ffff:ffff::"),
    ]
}
