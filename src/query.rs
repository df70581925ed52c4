//! Interface queries over the current OS state.
//!
//! Each call re-reads the address source; two calls may disagree if the
//! host's configuration changed in between.

use crate::format::{self, RenderMode};
use crate::inventory::{EnumerationResult, InventoryError, collect};
use crate::network::AddressSource;

/// Read-only queries composed from collection and rendering.
#[derive(Debug, Clone, Default)]
pub struct QueryService<S> {
    source: S,
}

impl<S: AddressSource> QueryService<S> {
    /// Creates a service reading from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns a reference to the address source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// `<address>/<prefix>` lines for one interface.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NotFound`] if the interface has no IPv4/IPv6 address,
    /// [`InventoryError::Source`] if enumeration fails.
    pub fn describe_interface(&self, name: &str) -> Result<Vec<String>, InventoryError> {
        self.render(Some(name), RenderMode::Single)
    }

    /// Every interface name, one per line.
    ///
    /// # Errors
    ///
    /// [`InventoryError::Source`] if enumeration fails.
    pub fn list_interface_names(&self) -> Result<Vec<String>, InventoryError> {
        self.render(None, RenderMode::Names)
    }

    /// Every interface with its addresses, grouped.
    ///
    /// # Errors
    ///
    /// [`InventoryError::Source`] if enumeration fails.
    pub fn describe_all_interfaces(&self) -> Result<Vec<String>, InventoryError> {
        self.render(None, RenderMode::Grouped)
    }

    /// Collects with `filter` and renders the result as `mode` lines.
    ///
    /// # Errors
    ///
    /// Same as [`collect`].
    pub fn render(
        &self,
        filter: Option<&str>,
        mode: RenderMode,
    ) -> Result<Vec<String>, InventoryError> {
        let result = collect(&self.source, filter)?;
        Ok(format::render(&result, mode))
    }

    /// The raw enumeration, optionally restricted to one interface.
    ///
    /// # Errors
    ///
    /// Same as [`collect`].
    pub fn enumerate(&self, filter: Option<&str>) -> Result<EnumerationResult, InventoryError> {
        collect(&self.source, filter)
    }
}
