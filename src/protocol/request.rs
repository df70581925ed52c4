//! Request parsing for the line-based query protocol.
//!
//! A request is `IFNAME <name>` or `ALL`, read as whitespace-delimited
//! tokens. Only the tokens a command needs are read; anything after them is
//! left unread.

use std::fmt;
use std::io;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Command asking for one interface's addresses.
pub const IFNAME: &str = "IFNAME";

/// Command asking for every interface with its addresses.
pub const ALL: &str = "ALL";

/// Maximum length of a single request token, in bytes.
pub const MAX_TOKEN_LEN: usize = 255;

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `IFNAME <name>`
    Interface(String),
    /// `ALL`
    All,
}

impl Request {
    /// The command keyword of this request.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Interface(_) => IFNAME,
            Self::All => ALL,
        }
    }

    /// Builds an `IFNAME` request for `name`.
    ///
    /// The name must survive the agent's tokenizer as a single token: it may
    /// not be empty, contain ASCII whitespace, or exceed [`MAX_TOKEN_LEN`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingArgument`] for an empty name,
    /// [`RequestError::Whitespace`] or [`RequestError::TokenTooLong`]
    /// otherwise.
    pub fn interface(name: impl Into<String>) -> Result<Self, RequestError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RequestError::MissingArgument { command: IFNAME });
        }
        if name.len() > MAX_TOKEN_LEN {
            return Err(RequestError::TokenTooLong {
                limit: MAX_TOKEN_LEN,
            });
        }
        if name.bytes().any(|byte| byte.is_ascii_whitespace()) {
            return Err(RequestError::Whitespace { token: name });
        }
        Ok(Self::Interface(name))
    }

    /// Checks that the request can be sent as-is.
    ///
    /// # Errors
    ///
    /// Same as [`Request::interface`].
    pub fn validate(&self) -> Result<(), RequestError> {
        match self {
            Self::Interface(name) => Self::interface(name.as_str()).map(|_| ()),
            Self::All => Ok(()),
        }
    }

    /// The request as sent on the wire, newline-terminated.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface(name) => write!(f, "{} {name}", self.command()),
            Self::All => f.write_str(self.command()),
        }
    }
}

/// A request that could not be parsed.
///
/// Never reported to the peer: the connection is closed without a response.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The peer closed the stream before sending a command.
    #[error("No command received")]
    Empty,

    /// The first token is not a known command.
    #[error("Unknown command '{command}'")]
    UnknownCommand {
        /// The token that was received
        command: String,
    },

    /// The command needs an argument that never arrived.
    #[error("Command '{command}' is missing its argument")]
    MissingArgument {
        /// The command keyword
        command: &'static str,
    },

    /// A token exceeded [`MAX_TOKEN_LEN`].
    #[error("Token longer than {limit} bytes")]
    TokenTooLong {
        /// The limit that was exceeded
        limit: usize,
    },

    /// A token to be sent contains whitespace and would split in two.
    #[error("Token '{token}' contains whitespace")]
    Whitespace {
        /// The offending token
        token: String,
    },

    /// A token was not valid UTF-8.
    #[error("Token is not valid UTF-8")]
    InvalidUtf8,

    /// Reading from the peer failed.
    #[error("Failed to read request: {0}")]
    Io(#[from] io::Error),
}

/// Reads one request from `reader`.
///
/// # Errors
///
/// Returns [`RequestError`] for EOF before a command, unknown commands,
/// missing arguments, oversized or non-UTF-8 tokens, and read failures.
pub async fn read_request<R>(reader: &mut R) -> Result<Request, RequestError>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let command = read_token(reader).await?.ok_or(RequestError::Empty)?;

    match command.as_str() {
        IFNAME => {
            let name = read_token(reader)
                .await?
                .ok_or(RequestError::MissingArgument { command: IFNAME })?;
            Ok(Request::Interface(name))
        }
        ALL => Ok(Request::All),
        _ => Err(RequestError::UnknownCommand { command }),
    }
}

/// Reads the next whitespace-delimited token.
///
/// Leading whitespace is skipped. A token is terminated by whitespace or
/// end-of-stream; `Ok(None)` means end-of-stream came first.
async fn read_token<R>(reader: &mut R) -> Result<Option<String>, RequestError>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mut token = Vec::new();

    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            break;
        }

        let mut consumed = 0;
        let mut complete = false;
        for &byte in buf {
            consumed += 1;
            if byte.is_ascii_whitespace() {
                if token.is_empty() {
                    continue;
                }
                complete = true;
                break;
            }
            if token.len() == MAX_TOKEN_LEN {
                return Err(RequestError::TokenTooLong {
                    limit: MAX_TOKEN_LEN,
                });
            }
            token.push(byte);
        }
        reader.consume(consumed);

        if complete {
            break;
        }
    }

    if token.is_empty() {
        return Ok(None);
    }

    String::from_utf8(token)
        .map(Some)
        .map_err(|_| RequestError::InvalidUtf8)
}
