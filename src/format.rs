//! Text rendering of an [`EnumerationResult`].
//!
//! Every renderer is a pure function returning lines without terminators;
//! callers decide where the lines go ([`write_lines`] for blocking sinks,
//! the protocol handler for sockets).

use std::io::{self, Write};
use std::net::IpAddr;

use serde::Serialize;

use crate::inventory::EnumerationResult;
use crate::network::AddressFamily;

/// Indentation of address lines in grouped mode.
const GROUPED_INDENT: &str = "  ";

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `<address>/<prefix>` per address, no interface names.
    Single,
    /// One interface name per line.
    Names,
    /// `<name>:` headers, indented addresses, blank line between interfaces.
    Grouped,
}

/// Renders `result` in the given mode.
#[must_use]
pub fn render(result: &EnumerationResult, mode: RenderMode) -> Vec<String> {
    match mode {
        RenderMode::Single => render_single(result),
        RenderMode::Names => render_names(result),
        RenderMode::Grouped => render_grouped(result),
    }
}

/// One `<address>/<prefix>` line per address record.
#[must_use]
pub fn render_single(result: &EnumerationResult) -> Vec<String> {
    result.records().map(ToString::to_string).collect()
}

/// One line per interface, the name alone.
#[must_use]
pub fn render_names(result: &EnumerationResult) -> Vec<String> {
    result.names().map(str::to_string).collect()
}

/// Interfaces with their addresses:
///
/// ```text
/// eth0:
///   10.0.0.1/24
///
/// lo:
///   127.0.0.1/8
/// ```
///
/// No blank line follows the last interface.
#[must_use]
pub fn render_grouped(result: &EnumerationResult) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, group) in result.groups().iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{}:", group.name()));
        lines.extend(
            group
                .addresses()
                .iter()
                .map(|record| format!("{GROUPED_INDENT}{record}")),
        );
    }
    lines
}

/// Writes each line followed by `\n`.
///
/// # Errors
///
/// Returns the first I/O error from `sink`.
pub fn write_lines<W: Write + ?Sized>(sink: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(sink, "{line}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonInterface<'a> {
    name: &'a str,
    addresses: Vec<JsonAddress>,
}

#[derive(Serialize)]
struct JsonAddress {
    address: IpAddr,
    prefix_len: u32,
    family: AddressFamily,
}

/// Renders the groups as a pretty-printed JSON array.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn render_json(result: &EnumerationResult) -> serde_json::Result<String> {
    let interfaces: Vec<JsonInterface<'_>> = result
        .groups()
        .iter()
        .map(|group| JsonInterface {
            name: group.name(),
            addresses: group
                .addresses()
                .iter()
                .map(|record| JsonAddress {
                    address: record.address(),
                    prefix_len: record.prefix_len(),
                    family: record.family(),
                })
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&interfaces)
}
