//! The agent's TCP query protocol.
//!
//! A client connects, sends one request, and reads until the agent closes
//! the connection:
//!
//! - `IFNAME <name>`: one `address/prefix` line per address of `<name>`
//! - `ALL`: every interface as a `name:` header followed by indented
//!   `address/prefix` lines, groups separated by a blank line
//!
//! Errors are never written to the peer. Malformed requests, unknown
//! interfaces, and enumeration failures all close the connection with an
//! empty response.

mod client;
mod handler;
mod request;
mod server;

pub use client::{ClientError, DEFAULT_CONNECT_TIMEOUT, RemoteClient};
pub use handler::{ConnectionOutcome, handle_connection};
pub use request::{ALL, IFNAME, MAX_TOKEN_LEN, Request, RequestError, read_request};
pub use server::{Agent, ServeError, bind};

/// Well-known port the agent listens on.
pub const DEFAULT_PORT: u16 = 5555;
