//! Startup orchestration.
//!
//! Fail fast: a bind error is fatal. The forwarder starts unconfigured.

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::lifecycle::signals;

/// Bind the configured address and serve until a termination signal.
pub async fn run(config: ServerConfig) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let port = listener.local_addr()?.port();

    tracing::info!(port, "Flow API proxy server running");
    tracing::info!("Health check: http://localhost:{}/health", port);
    tracing::info!("Set base URL: POST http://localhost:{}/config/base-url", port);

    HttpServer::new(config)
        .run(listener, signals::wait_for_signal())
        .await
}
