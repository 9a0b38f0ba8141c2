//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use flow_proxy::{Forwarder, HttpServer, ServerConfig};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Mock upstream that answers every request with a fixed response and
/// records what it received.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable mock upstream on an ephemeral port.
pub async fn start_programmable_backend(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = requests.clone();

    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, bytes: Bytes| {
            let captured = captured.clone();
            async move {
                captured.lock().unwrap().push(CapturedRequest {
                    method,
                    path: uri.path().to_string(),
                    query: uri.query().map(str::to_string),
                    headers,
                    body: bytes,
                });
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(CONTENT_TYPE, content_type)],
                    body,
                )
            }
        },
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, requests }
}

/// An address nothing is listening on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Upstream that accepts connections but never answers.
pub async fn start_stalled_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Bind the proxy on an ephemeral port and serve until `stop` resolves.
pub async fn spawn_proxy<F>(stop: F) -> (String, tokio::task::JoinHandle<std::io::Result<()>>)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let forwarder = Arc::new(Forwarder::new(
        reqwest::Client::builder().no_proxy().build().unwrap(),
    ));
    let server = HttpServer::with_forwarder(ServerConfig::default(), forwarder);
    let handle = tokio::spawn(server.run(listener, stop));

    (format!("http://{}", addr), handle)
}

/// Start the proxy for the lifetime of the test runtime.
pub async fn start_proxy() -> String {
    spawn_proxy(std::future::pending::<()>()).await.0
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Configure the proxy's base URL, asserting success.
pub async fn configure(proxy: &str, base_url: &str) {
    let res = client()
        .post(format!("{}/config/base-url", proxy))
        .json(&serde_json::json!({ "baseUrl": base_url }))
        .send()
        .await
        .expect("Proxy unreachable");
    assert_eq!(res.status(), 200, "base URL {base_url} should be accepted");
}
