//! The agent's accept loop.
//!
//! # Responsibilities
//! - Accept connections from a bound listener
//! - Run each connection in its own task, at most `max_connections` at once
//! - Keep each connection strictly sequential: one request, one response
//! - Stop accepting when the shutdown future resolves

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::inventory::InventoryError;
use crate::network::AddressSource;
use crate::query::QueryService;

use super::handler::{ConnectionOutcome, handle_connection};

/// Pause after a failed `accept` before trying again.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Error type for the agent's listener.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Binding the listening socket failed.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address that could not be bound
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The connection limiter was closed while the loop was running.
    #[error("Connection limiter closed unexpectedly")]
    LimiterClosed,
}

/// Binds a TCP listener on `addr`.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] if the address is unavailable.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })
}

/// Serves interface queries to remote peers.
pub struct Agent<S> {
    service: Arc<QueryService<S>>,
    connection_limit: Arc<Semaphore>,
    max_connections: usize,
    request_timeout: Option<Duration>,
}

impl<S> Agent<S>
where
    S: AddressSource + 'static,
{
    /// Creates an agent answering from `service`, handling at most
    /// `max_connections` connections concurrently.
    ///
    /// Limits above [`Semaphore::MAX_PERMITS`] are lowered to it.
    #[must_use]
    pub fn new(service: QueryService<S>, max_connections: usize) -> Self {
        let max_connections = max_connections.min(Semaphore::MAX_PERMITS);
        Self {
            service: Arc::new(service),
            connection_limit: Arc::new(Semaphore::new(max_connections)),
            max_connections,
            request_timeout: None,
        }
    }

    /// Drops connections that have not finished within `timeout`.
    ///
    /// `None` (the default) waits indefinitely.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Configured maximum concurrent connections.
    #[must_use]
    pub const fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Accepts connections until `shutdown` resolves.
    ///
    /// A connection slot is acquired before each `accept`, so at the limit
    /// new peers wait in the OS backlog. Accept errors are logged and the
    /// loop retries after a short pause. Connections already running are
    /// not cancelled on shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::LimiterClosed`] if the semaphore is closed.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let permit = tokio::select! {
                biased;

                () = &mut shutdown => break,

                permit = Arc::clone(&self.connection_limit).acquire_owned() => {
                    permit.map_err(|_| ServeError::LimiterClosed)?
                }
            };

            let (stream, peer) = tokio::select! {
                biased;

                () = &mut shutdown => break,

                accepted = listener.accept() => match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        accept_error_backoff(&e).await;
                        continue;
                    }
                },
            };

            tracing::debug!(
                %peer,
                available_permits = self.connection_limit.available_permits(),
                "Connection accepted"
            );

            let service = Arc::clone(&self.service);
            let timeout = self.request_timeout;
            tokio::spawn(async move {
                serve_connection(&service, stream, peer, timeout).await;
                drop(permit);
            });
        }

        tracing::info!("Shutdown signal received, no longer accepting connections");
        Ok(())
    }
}

/// Logs a failed `accept` and waits before the next attempt, so errors such
/// as `EMFILE` do not busy-loop.
async fn accept_error_backoff(error: &std::io::Error) {
    tracing::warn!(
        "Failed to accept connection: {error}, retrying in {}ms",
        ACCEPT_ERROR_BACKOFF.as_millis()
    );
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}

async fn serve_connection<S: AddressSource>(
    service: &QueryService<S>,
    stream: TcpStream,
    peer: SocketAddr,
    timeout: Option<Duration>,
) {
    let handled = handle_connection(service, stream);

    let result = match timeout {
        Some(limit) => {
            if let Ok(result) = tokio::time::timeout(limit, handled).await {
                result
            } else {
                tracing::debug!(%peer, "Connection timed out after {}ms", limit.as_millis());
                return;
            }
        }
        None => handled.await,
    };

    match result {
        Ok(outcome) => log_outcome(peer, &outcome),
        Err(e) => tracing::debug!(%peer, "Failed to write response: {e}"),
    }
}

fn log_outcome(peer: SocketAddr, outcome: &ConnectionOutcome) {
    match outcome {
        ConnectionOutcome::Served { request, lines } => {
            tracing::debug!(%peer, %request, lines, "Request served");
        }
        ConnectionOutcome::Rejected(e) => {
            tracing::debug!(%peer, "Dropped malformed request: {e}");
        }
        ConnectionOutcome::QueryFailed {
            request,
            error: error @ InventoryError::NotFound { .. },
        } => {
            tracing::debug!(%peer, %request, "{error}");
        }
        ConnectionOutcome::QueryFailed { request, error } => {
            tracing::warn!(%peer, %request, "Query failed: {error}");
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
