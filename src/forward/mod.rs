//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → ForwardRequest (method, path, optional body/query)
//!     → Forwarder::forward
//!         → base URL + path (literal concatenation)
//!         → reqwest call, one attempt, client default timeouts
//!     → ForwardResponse (status/headers/body untouched)
//!       or ForwardError (Unconfigured | UpstreamUnreachable)
//! ```
//!
//! Upstream 4xx/5xx are results, not errors.

pub mod forwarder;
pub mod types;

pub use forwarder::{Forwarder, AUTOMATED_CLIENT_HEADER, AUTOMATED_CLIENT_VALUE};
pub use types::{ForwardError, ForwardRequest, ForwardResponse};
