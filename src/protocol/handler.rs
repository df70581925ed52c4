//! Per-connection request handling.
//!
//! One connection carries exactly one request: read it, answer it, close.
//! Neither malformed requests nor failed queries are reported to the peer;
//! it only sees the connection close.

use std::io;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::inventory::InventoryError;
use crate::network::AddressSource;
use crate::query::QueryService;

use super::request::{Request, RequestError, read_request};

/// What happened on a connection, for server-side logging.
#[derive(Debug)]
pub enum ConnectionOutcome {
    /// The request was answered with `lines` lines.
    Served {
        /// The request that was answered
        request: Request,
        /// Number of response lines written
        lines: usize,
    },
    /// The request could not be parsed; nothing was written.
    Rejected(RequestError),
    /// The query failed; nothing was written.
    QueryFailed {
        /// The request that failed
        request: Request,
        /// Why it failed
        error: InventoryError,
    },
}

impl ConnectionOutcome {
    /// Returns true if a response was written.
    #[must_use]
    pub const fn is_served(&self) -> bool {
        matches!(self, Self::Served { .. })
    }
}

/// Serves a single request on `stream`, then closes it.
///
/// The write half is flushed and shut down on every path, including parse
/// and query failures; the stream itself is dropped on return.
///
/// # Errors
///
/// Returns an error only if writing the response fails. Read failures are
/// reported as [`ConnectionOutcome::Rejected`].
pub async fn handle_connection<S, T>(
    service: &QueryService<S>,
    stream: T,
) -> io::Result<ConnectionOutcome>
where
    S: AddressSource,
    T: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut writer = BufWriter::new(writer);

    let outcome = respond(service, &mut reader, &mut writer).await;

    // BufWriter flushes before shutting down the inner half.
    if let Err(e) = writer.shutdown().await {
        tracing::debug!("Failed to shut down connection: {e}");
    }

    outcome
}

async fn respond<S, R, W>(
    service: &QueryService<S>,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<ConnectionOutcome>
where
    S: AddressSource,
    R: tokio::io::AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let request = match read_request(reader).await {
        Ok(request) => request,
        Err(e) => return Ok(ConnectionOutcome::Rejected(e)),
    };

    let result = match &request {
        Request::Interface(name) => service.describe_interface(name),
        Request::All => service.describe_all_interfaces(),
    };

    let lines = match result {
        Ok(lines) => lines,
        Err(error) => return Ok(ConnectionOutcome::QueryFailed { request, error }),
    };

    for line in &lines {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    Ok(ConnectionOutcome::Served {
        request,
        lines: lines.len(),
    })
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
