//! Flow API forwarding proxy.
//!
//! Accepts a fixed set of routes, re-issues each request against a runtime
//! configurable upstream base URL and relays the upstream status and body.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use forward::Forwarder;
pub use http::HttpServer;
