//! Structured logging setup shared by both binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "rhino_bridge=info,tower_http=info";

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `default_filter`. A second call leaves the first
/// subscriber in place.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(error) = installed {
        tracing::debug!(error = %error, "tracing subscriber already installed");
    }
}
