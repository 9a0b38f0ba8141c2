//! Observability subsystem.
//!
//! Structured logging only; every request also carries an `x-request-id`
//! set by the HTTP layer and recorded in its trace span.

pub mod logging;
