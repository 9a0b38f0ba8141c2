//! Configuration loading from the environment.

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// Environment variable selecting the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` was set but is not a valid TCP port.
    #[error("Invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Build the server configuration from process environment.
pub fn load_from_env() -> Result<ServerConfig, ConfigError> {
    load_with(std::env::var(PORT_ENV).ok())
}

/// Build the server configuration from an optional `PORT` value.
///
/// An unset or blank value falls back to the default port.
pub fn load_with(port: Option<String>) -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::default();

    if let Some(raw) = port.filter(|p| !p.trim().is_empty()) {
        config.listener.port = raw
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidPort { value: raw.clone(), source })?;
    }

    Ok(config)
}
