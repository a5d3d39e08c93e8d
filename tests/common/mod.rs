//! Shared utilities for integration testing: programmable mock
//! downstream services and a BFF spawner.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::Request;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Router;
use tokio::net::TcpListener;

use audit_bff::config::BffConfig;
use audit_bff::http::HttpServer;

/// One request observed by a mock downstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// A mock downstream service bound to an ephemeral port, recording
/// every request it receives.
pub struct MockDownstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockDownstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Total requests received.
    #[allow(dead_code)]
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received for paths starting with the given prefix.
    #[allow(dead_code)]
    pub fn hits_for(&self, path_prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path.starts_with(path_prefix))
            .count()
    }

    /// Snapshot of everything received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable mock downstream. The responder sees each
/// recorded request and picks the status and JSON body to return.
pub async fn start_downstream<F>(respond: F) -> MockDownstream
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let respond = Arc::new(respond);

    let app = Router::new().fallback(move |request: Request| {
        let recorded = recorded.clone();
        let respond = respond.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, 1024 * 1024)
                .await
                .unwrap_or_default();
            let record = RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().unwrap_or("").to_string(),
                headers: parts.headers.clone(),
                body: String::from_utf8_lossy(&bytes).to_string(),
            };
            let (status, body) = respond(&record);
            recorded.lock().unwrap().push(record);
            (
                StatusCode::from_u16(status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockDownstream { addr, requests }
}

/// Start a mock downstream returning one fixed status and body.
#[allow(dead_code)]
pub async fn start_json_downstream(status: u16, body: &str) -> MockDownstream {
    let body = body.to_string();
    start_downstream(move |_| (status, body.clone())).await
}

/// A BFF config pointed at a mock CQRS gateway.
#[allow(dead_code)]
pub fn test_config(cqrs_base_url: &str) -> BffConfig {
    let mut config = BffConfig::default();
    config.cqrs.base_url = cqrs_base_url.to_string();
    config.cqrs.cjs_cppuid = "test-cpp-uid".to_string();
    config
}

/// Spawn the BFF on an ephemeral port and return its address.
pub async fn start_bff(config: BffConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}
