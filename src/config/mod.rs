//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! PORT env var
//!     → loader.rs (parse, apply defaults)
//!     → ServerConfig (immutable for the process lifetime)
//!
//! POST /config/base-url
//!     → validation.rs (absolute URL check)
//!     → Forwarder (atomic swap of the stored base URL)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{LimitsConfig, ListenerConfig, ServerConfig, DEFAULT_PORT};
pub use validation::{parse_base_url, BaseUrlError};
