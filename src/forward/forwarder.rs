//! Upstream forwarder holding the runtime base URL.

use arc_swap::ArcSwapOption;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;

use crate::config::validation::{parse_base_url, BaseUrlError};
use crate::forward::types::{ForwardError, ForwardRequest, ForwardResponse};

/// Marker header telling tunnelling hosts to skip their browser interstitial.
pub const AUTOMATED_CLIENT_HEADER: &str = "ngrok-skip-browser-warning";
pub const AUTOMATED_CLIENT_VALUE: &str = "test";

/// Relays requests to a single, reconfigurable upstream.
///
/// The base URL is swapped atomically without locking. A forward that races
/// with an update may use either the old or the new value.
pub struct Forwarder {
    client: reqwest::Client,
    base_url: ArcSwapOption<String>,
}

impl Forwarder {
    /// Create an unconfigured forwarder using the given HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: ArcSwapOption::empty(),
        }
    }

    /// Validate and store a new base URL, replacing any previous value.
    ///
    /// A rejected candidate leaves the stored value untouched.
    pub fn set_base_url(&self, candidate: Option<&str>) -> Result<Arc<String>, BaseUrlError> {
        let valid = Arc::new(parse_base_url(candidate)?.to_string());
        self.base_url.store(Some(valid.clone()));
        tracing::info!(base_url = %valid, "Base URL updated");
        Ok(valid)
    }

    /// Current base URL, if one has been set.
    pub fn base_url(&self) -> Option<Arc<String>> {
        self.base_url.load_full()
    }

    /// Literal concatenation of base URL and path. No slash normalization.
    pub fn target_url(&self, path: &str) -> Result<String, ForwardError> {
        let base = self.base_url().ok_or(ForwardError::Unconfigured)?;
        Ok(format!("{}{}", base, path))
    }

    /// Issue a single attempt against the upstream.
    ///
    /// Any upstream status (4xx/5xx included) is a successful result.
    pub async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, ForwardError> {
        let target = self.target_url(&request.path)?;

        tracing::debug!(
            method = %request.method,
            target = %target,
            has_body = request.body.is_some(),
            "Forwarding request"
        );

        let mut outbound = self
            .client
            .request(request.method, &target)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTOMATED_CLIENT_HEADER, AUTOMATED_CLIENT_VALUE);

        if let Some(query) = &request.query {
            outbound = outbound.query(query);
        }
        if let Some(body) = &request.body {
            outbound = outbound.json(body);
        }

        let response = outbound.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(target = %target, status = %status, "Upstream responded");

        Ok(ForwardResponse { status, headers, body })
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
