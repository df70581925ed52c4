//! Client side of the query protocol.

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use super::DEFAULT_PORT;
use super::request::{Request, RequestError};

/// Default time allowed for establishing the connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for remote queries.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Every resolved address refused or failed the connection.
    #[error("Failed to connect to {target}: {source}")]
    Connect {
        /// `host:port` that was dialed
        target: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The connection was not established in time.
    #[error("Timed out connecting to {target} after {}s", timeout.as_secs())]
    Timeout {
        /// `host:port` that was dialed
        target: String,
        /// The timeout that elapsed
        timeout: Duration,
    },

    /// The request cannot be represented on the wire.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// Sending the request or relaying the response failed.
    #[error("I/O error while talking to agent: {0}")]
    Io(#[from] io::Error),
}

/// Queries a remote agent.
///
/// Each query opens a fresh connection, since the agent answers one request
/// per connection.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    host: String,
    port: u16,
    connect_timeout: Duration,
}

impl RemoteClient {
    /// Creates a client for the agent at `host:port`.
    ///
    /// `host` may be a hostname or an IPv4/IPv6 literal; names are resolved
    /// for both families.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Creates a client for `host` on [`DEFAULT_PORT`].
    #[must_use]
    pub fn with_default_port(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT)
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// The target as `host:port`, with IPv6 literals bracketed.
    #[must_use]
    pub fn target(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Sends `request` and copies the raw response into `sink` until the
    /// agent closes the connection.
    ///
    /// An empty response is not an error: the agent closes silently on
    /// unknown interfaces and malformed requests.
    ///
    /// Returns the number of response bytes copied.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] before connecting if the
    /// request would not parse as one request on the agent side. Otherwise
    /// returns [`ClientError`] if the connection cannot be established in
    /// time, or if writing the request or relaying the response fails.
    pub async fn query<W>(&self, request: &Request, sink: &mut W) -> Result<u64, ClientError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        request.validate()?;

        let mut stream = self.connect().await?;
        tracing::debug!(target = %self.target(), %request, "Sending request");

        stream.write_all(request.to_line().as_bytes()).await?;
        stream.flush().await?;

        let copied = tokio::io::copy(&mut stream, sink).await?;
        sink.flush().await?;

        tracing::debug!(bytes = copied, "Agent closed the connection");
        Ok(copied)
    }

    async fn connect(&self) -> Result<TcpStream, ClientError> {
        let dial = TcpStream::connect((self.host.as_str(), self.port));

        match tokio::time::timeout(self.connect_timeout, dial).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(ClientError::Connect {
                target: self.target(),
                source,
            }),
            Err(_) => Err(ClientError::Timeout {
                target: self.target(),
                timeout: self.connect_timeout,
            }),
        }
    }
}

impl fmt::Display for RemoteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target())
    }
}
