//! Runs the bridge server over the demonstration host.
//!
//! Usage:
//!
//! ```text
//! bridge-server [--host <HOST>] [--port <PORT>] [--debug]
//! ```
//!
//! Settings are read from the environment (and a `.env` file, when present)
//! first; flags override them. The server binds to loopback only and stops
//! gracefully on Ctrl-C.

use clap::Parser;
use mockable::DefaultClock;
use rhino_bridge::{
    bridge::server::{BridgeServer, SerializedExecutor, resolve_bind_address},
    catalog::dispatch_table,
    config::{BridgeSettings, VerbosityFlag},
    host::{adapters::demo_host, session::HostSession},
    telemetry,
};
use std::sync::Arc;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Command line flags.
#[derive(Debug, Parser)]
#[command(name = "bridge-server", version, about = "Serves the modeling host over HTTP")]
struct Cli {
    /// Bind host; overrides `RHINO_BRIDGE_HOST`.
    #[arg(long)]
    host: Option<String>,
    /// Bind port; overrides `RHINO_BRIDGE_PORT`.
    #[arg(long)]
    port: Option<u16>,
    /// Starts with verbose responses; overrides `DEBUG_MODE`.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn apply(self, mut settings: BridgeSettings) -> BridgeSettings {
        if let Some(host) = self.host {
            settings = settings.with_host(host);
        }
        if let Some(port) = self.port {
            settings = settings.with_port(port);
        }
        if self.debug {
            settings = settings.with_debug_mode(true);
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv = dotenvy::dotenv();
    telemetry::init(telemetry::DEFAULT_FILTER);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error.into()),
    }

    let settings = Cli::parse().apply(BridgeSettings::from_env()?);
    let host = demo_host()?;
    let table = dispatch_table(Arc::new(DefaultClock))?;
    tracing::info!(
        endpoints = table.len(),
        debug_mode = settings.debug_mode(),
        "bridge server configured"
    );
    let executor = SerializedExecutor::new(
        HostSession::new(Box::new(host)),
        table,
        VerbosityFlag::new(settings.debug_mode()),
    );
    let address = resolve_bind_address(&settings.bind_address())?;
    let running = BridgeServer::new(address, executor).start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    running.stop().await?;
    Ok(())
}
