//! Route handlers: base URL configuration, forwarded routes and health.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::validation::BaseUrlError;
use crate::forward::ForwardRequest;
use crate::http::request::InboundBody;
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Upstream path for webhook traffic.
pub const WEBHOOK_PATH: &str = "/webhook";
/// Upstream path for flow data exchange.
pub const FLOW_PATH: &str = "/flow";
/// Reported in place of the base URL while unconfigured.
pub const NOT_SET: &str = "Not set";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseUrlUpdated {
    pub message: &'static str,
    pub base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseUrlStatus {
    pub base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub base_url: String,
    pub timestamp: String,
}

pub async fn set_base_url(
    State(state): State<AppState>,
    InboundBody(body): InboundBody,
) -> Result<Json<BaseUrlUpdated>, ApiError> {
    let candidate = match body.get("baseUrl") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            tracing::warn!(value = %other, "Rejected non-string base URL");
            return Err(BaseUrlError::InvalidUrl {
                reason: "baseUrl must be a string".to_string(),
            }
            .into());
        }
    };

    let stored = state
        .forwarder
        .set_base_url(candidate)
        .inspect_err(|e| tracing::warn!(error = ?e, "Rejected base URL update"))?;

    Ok(Json(BaseUrlUpdated {
        message: "Base URL updated successfully",
        base_url: stored.to_string(),
    }))
}

pub async fn get_base_url(State(state): State<AppState>) -> Json<BaseUrlStatus> {
    Json(BaseUrlStatus {
        base_url: current_base_url(&state),
    })
}

pub async fn webhook_get(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    relay(&state, ForwardRequest::get(WEBHOOK_PATH).with_query(Some(query))).await
}

pub async fn webhook_post(
    State(state): State<AppState>,
    InboundBody(body): InboundBody,
) -> Result<Response, ApiError> {
    relay(&state, ForwardRequest::post(WEBHOOK_PATH).with_body(Some(body))).await
}

pub async fn flow_post(
    State(state): State<AppState>,
    InboundBody(body): InboundBody,
) -> Result<Response, ApiError> {
    relay(&state, ForwardRequest::post(FLOW_PATH).with_body(Some(body))).await
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        base_url: current_base_url(&state),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Forward and relay the upstream status with its body rendered as JSON.
async fn relay(state: &AppState, request: ForwardRequest) -> Result<Response, ApiError> {
    let upstream = state.forwarder.forward(request).await?;
    Ok((upstream.status, Json(upstream.json_body())).into_response())
}

fn current_base_url(state: &AppState) -> String {
    state
        .forwarder
        .base_url()
        .map(|url| url.to_string())
        .unwrap_or_else(|| NOT_SET.to_string())
}
