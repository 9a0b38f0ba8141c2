//! Configuration schema definitions.
//!
//! Static settings fixed at startup. The upstream base URL is runtime
//! state and lives on the [`Forwarder`](crate::forward::Forwarder), not here.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 100 * 1024, // 100KB
        }
    }
}

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;
