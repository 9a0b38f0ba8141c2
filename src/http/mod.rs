//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, CORS, tracing, body limit)
//!     → request.rs (request ID generation, body decoding)
//!     → handlers.rs (config / forwarded routes / health)
//!     → forward::Forwarder (upstream call)
//!     → response.rs (error envelopes) or relayed upstream status + body
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{InboundBody, UuidRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{build_router, AppState, HttpServer};
