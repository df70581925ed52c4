//! Application execution logic.
//!
//! This module runs the selected mode: a local query printed to stdout, the
//! agent's accept loop, a query relayed from a remote agent, or writing the
//! configuration template.

use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;
use tokio::io::AsyncWrite;
use tokio::signal;

use ifshow::config::{
    AgentSettings, ConfigError, LocalQuery, Mode, QueryTarget, RemoteSettings, ValidatedConfig,
    write_default_config,
};
use ifshow::format::{render_json, write_lines};
use ifshow::inventory::InventoryError;
use ifshow::network::AddressSource;
use ifshow::network::platform::PlatformSource;
use ifshow::protocol::{Agent, ClientError, RemoteClient, ServeError, bind};
use ifshow::query::QueryService;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The local query failed (unknown interface or address source error).
    #[error(transparent)]
    Query(#[from] InventoryError),

    /// Rendering JSON output failed.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),

    /// The agent could not start or stopped unexpectedly.
    #[error(transparent)]
    Serve(#[from] ServeError),

    /// The remote query failed.
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// The configuration template could not be written.
    #[error(transparent)]
    Init(ConfigError),
}

impl RunError {
    /// Returns true if the requested interface does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Query(InventoryError::NotFound { .. }))
    }

    /// Returns true if the failure belongs to configuration rather than to
    /// running a query.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Init(_))
    }
}

/// Executes the selected mode.
///
/// # Errors
///
/// Returns an error if:
/// - The local query fails or its output cannot be written
/// - The agent cannot bind its listen address
/// - The remote agent cannot be reached
/// - The configuration template cannot be written
///
/// # Coverage Note
///
/// This function is excluded from coverage because it uses the live
/// interface table, stdout, and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    match config.mode {
        Mode::Local(query) => {
            let service = QueryService::new(PlatformSource::new());
            let stdout = io::stdout();
            run_local(&service, &query, &mut stdout.lock())
        }
        Mode::Agent(settings) => {
            run_agent(QueryService::new(PlatformSource::new()), &settings, shutdown_signal()).await
        }
        Mode::Remote(settings) => run_remote(&settings, &mut tokio::io::stdout()).await,
        Mode::Init(output) => run_init(&output, &mut io::stdout().lock()),
    }
}

/// Writes the configuration template to `output` and reports where.
fn run_init<W: Write>(output: &Path, out: &mut W) -> Result<(), RunError> {
    write_default_config(output).map_err(RunError::Init)?;
    writeln!(out, "Configuration template written to: {}", output.display())
        .map_err(RunError::Output)
}

/// Runs a query against this host and writes the result to `out`.
fn run_local<S, W>(
    service: &QueryService<S>,
    query: &LocalQuery,
    out: &mut W,
) -> Result<(), RunError>
where
    S: AddressSource,
    W: Write,
{
    if query.json {
        let filter = match &query.target {
            QueryTarget::Interface(name) => Some(name.as_str()),
            QueryTarget::Names | QueryTarget::All => None,
        };
        let json = render_json(&service.enumerate(filter)?)?;
        writeln!(out, "{json}").map_err(RunError::Output)?;
    } else {
        let lines = match &query.target {
            QueryTarget::Names => service.list_interface_names()?,
            QueryTarget::Interface(name) => service.describe_interface(name)?,
            QueryTarget::All => service.describe_all_interfaces()?,
        };
        write_lines(out, &lines).map_err(RunError::Output)?;
    }

    out.flush().map_err(RunError::Output)
}

/// Binds the listen address and serves queries until `shutdown` resolves.
async fn run_agent<S, F>(
    service: QueryService<S>,
    settings: &AgentSettings,
    shutdown: F,
) -> Result<(), RunError>
where
    S: AddressSource + 'static,
    F: Future<Output = ()>,
{
    let listener = bind(settings.listen).await?;
    let addr = listener.local_addr().unwrap_or(settings.listen);

    let host = hostname::get().map_or_else(
        |_| "unknown".to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    tracing::info!(
        "Agent on {host} listening on {addr} (max {} connections)",
        settings.max_connections
    );

    Agent::new(service, settings.max_connections)
        .with_request_timeout(settings.request_timeout)
        .serve(listener, shutdown)
        .await?;

    Ok(())
}

/// Sends the configured request to a remote agent and relays the response.
async fn run_remote<W>(settings: &RemoteSettings, out: &mut W) -> Result<(), RunError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let client = RemoteClient::new(&settings.host, settings.port)
        .with_connect_timeout(settings.connect_timeout);

    let bytes = client.query(&settings.request, out).await?;
    if bytes == 0 {
        tracing::debug!("Agent at {client} returned an empty response");
    }

    Ok(())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
