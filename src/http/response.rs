//! Error responses.
//!
//! Every failure is converted into a JSON envelope at the handler boundary:
//! `{"error": ...}` for rejected input, `{"error", "details"}` for failed
//! forwards. Upstream error statuses never reach this module; they are
//! relayed as-is.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::validation::BaseUrlError;
use crate::forward::ForwardError;

/// Error returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BaseUrl(#[from] BaseUrlError),

    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body could not be buffered (too large, aborted).
    #[error(transparent)]
    BodyRejected(#[from] BytesRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BaseUrl(e) => (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() })),
            ApiError::Forward(e) => {
                let details = e.details();
                tracing::error!(details = %details, "Proxy error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Proxy request failed", "details": details }),
                )
            }
            ApiError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request body", "details": details }),
            ),
            ApiError::BodyRejected(rejection) => {
                (rejection.status(), json!({ "error": rejection.body_text() }))
            }
        };

        (status, Json(body)).into_response()
    }
}
