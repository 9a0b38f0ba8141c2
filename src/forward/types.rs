//! Request, response and error types for upstream forwarding.

use axum::body::Bytes;
use reqwest::{header::HeaderMap, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// An outbound call to issue against the configured upstream.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Appended verbatim to the base URL.
    pub path: String,
    pub body: Option<Value>,
    /// Ordered query pairs; repeated keys are kept.
    pub query: Option<Vec<(String, String)>>,
}

impl ForwardRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: None,
        }
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// An empty query is treated as absent.
    pub fn with_query(mut self, query: Option<Vec<(String, String)>>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }
}

/// Whatever the upstream answered, error statuses included.
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw upstream body, never interpreted by the forwarder.
    pub body: Bytes,
}

impl ForwardResponse {
    /// Upstream body as JSON.
    ///
    /// Non-JSON bodies (including an empty one) become a JSON string.
    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&self.body).into_owned()))
    }
}

/// Failures of a forward attempt. Upstream HTTP error statuses are not failures.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// No base URL has been configured yet.
    #[error("Base URL not set. Please set the base URL first.")]
    Unconfigured,

    /// No complete response was received (DNS, connect, transport errors).
    #[error(transparent)]
    UpstreamUnreachable(#[from] reqwest::Error),
}

impl ForwardError {
    /// Human-readable description including the full source chain.
    pub fn details(&self) -> String {
        let mut details = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            details.push_str(": ");
            details.push_str(&err.to_string());
            source = err.source();
        }
        details
    }
}
