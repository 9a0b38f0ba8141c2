//! Structured logging.
//!
//! Uses `tracing` with an env-driven filter. `RUST_LOG` overrides the
//! default `flow_proxy=info,tower_http=info`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "flow_proxy=info,tower_http=info";

/// Install the global tracing subscriber.
///
/// Returns an error if a subscriber was already installed.
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
