//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Bind listener → Serve
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → serve loop dropped → process exits
//! ```
//!
//! No drain: in-flight forwards are abandoned on termination.

pub mod signals;
pub mod startup;
