//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, body limit)
//! - Bind server to listener and serve until told to stop

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::forward::Forwarder;
use crate::http::handlers;
use crate::http::request::UuidRequestId;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    forwarder: Arc<Forwarder>,
}

impl HttpServer {
    /// Create a new HTTP server with an unconfigured forwarder.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_forwarder(config, Arc::new(Forwarder::default()))
    }

    /// Create a server around an existing forwarder.
    pub fn with_forwarder(config: ServerConfig, forwarder: Arc<Forwarder>) -> Self {
        let state = AppState {
            forwarder: forwarder.clone(),
        };
        let router = build_router(&config, state);
        Self {
            router,
            config,
            forwarder,
        }
    }

    /// Serve until `stop` resolves.
    ///
    /// In-flight requests are not drained; they are abandoned when `stop`
    /// fires and this returns immediately.
    pub async fn run<F>(self, listener: TcpListener, stop: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        tokio::select! {
            result = axum::serve(listener, self.router).into_future() => result?,
            _ = stop => tracing::info!("HTTP server stopped"),
        }

        Ok(())
    }

    /// The router with all layers applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn forwarder(&self) -> &Arc<Forwarder> {
        &self.forwarder
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/config/base-url",
            get(handlers::get_base_url).post(handlers::set_base_url),
        )
        .route(
            handlers::WEBHOOK_PATH,
            get(handlers::webhook_get).post(handlers::webhook_post),
        )
        .route(handlers::FLOW_PATH, post(handlers::flow_post))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        HttpServer::new(ServerConfig::default()).router()
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn set_base_url(body: &str) -> Request<Body> {
        Request::post("/config/base-url")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_base_url_round_trip() {
        let router = app();

        let (status, body) = call(router.clone(), set_base_url(r#"{"baseUrl":"http://example.test"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Base URL updated successfully", "baseUrl": "http://example.test"})
        );

        let (status, body) = call(router, get_request("/config/base-url")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"baseUrl": "http://example.test"}));
    }

    #[tokio::test]
    async fn test_invalid_updates_rejected_and_value_kept() {
        let router = app();
        call(router.clone(), set_base_url(r#"{"baseUrl":"http://example.test"}"#)).await;

        let (status, body) = call(router.clone(), set_base_url(r#"{"baseUrl":""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Base URL is required"}));

        let (status, body) = call(router.clone(), set_base_url(r#"{}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Base URL is required"}));

        let (status, body) = call(router.clone(), set_base_url(r#"{"baseUrl":"not a url"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid URL format"}));

        let (status, _) = call(router.clone(), set_base_url(r#"{"baseUrl":42}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = call(router, get_request("/config/base-url")).await;
        assert_eq!(body["baseUrl"], "http://example.test");
    }

    #[tokio::test]
    async fn test_unconfigured_reports_not_set() {
        let (status, body) = call(app(), get_request("/config/base-url")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"baseUrl": "Not set"}));
    }

    #[tokio::test]
    async fn test_health_without_configuration() {
        let (status, body) = call(app(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["baseUrl"], "Not set");

        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_forwarding_before_configuration_is_500() {
        let router = app();

        let (status, body) = call(router.clone(), get_request("/webhook?a=1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Proxy request failed");
        assert!(body["details"].as_str().unwrap().contains("Base URL not set"));

        let request = Request::post("/flow")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"n":5}"#))
            .unwrap();
        let (status, body) = call(router, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Proxy request failed");
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_400() {
        let request = Request::post("/webhook")
            .header("content-type", "application/json")
            .body(Body::from("{oops"))
            .unwrap();
        let (status, body) = call(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let mut config = ServerConfig::default();
        config.limits.max_body_bytes = 16;
        let router = HttpServer::new(config).router();

        let request = Request::post("/flow")
            .header("content-type", "application/json")
            .body(Body::from(format!(r#"{{"pad":"{}"}}"#, "x".repeat(64))))
            .unwrap();
        let (status, _) = call(router, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app().oneshot(get_request("/admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
