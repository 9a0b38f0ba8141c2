//! Flow API forwarding proxy.
//!
//! ```text
//!   client ──▶ /webhook (GET, POST) ─┐
//!   client ──▶ /flow    (POST)      ─┼──▶ Forwarder ──▶ {base URL}{path} ──▶ upstream
//!                                    │        ▲
//!   client ──▶ /config/base-url ─────┘        │ status + body relayed as-is
//!   client ──▶ /health                        │
//! ```
//!
//! The only environment input is `PORT` (default 3000).

use flow_proxy::config::load_from_env;
use flow_proxy::lifecycle::startup;
use flow_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;

    tracing::info!("flow-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_from_env()?;
    tracing::info!(bind_address = %config.listener.bind_address(), "Configuration loaded");

    startup::run(config).await?;

    tracing::info!("Exiting");
    Ok(())
}
