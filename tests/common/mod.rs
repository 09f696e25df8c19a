//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

use edge_gateway::{EdgeConfig, EntryPoint, HttpServer};

/// A request as the fake upstream saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.path_and_query.split_once('?')?.1;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Handle to a running fake upstream.
#[derive(Clone)]
pub struct FakeUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeUpstream {
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("upstream received no request")
    }
}

/// Start a programmable upstream on an ephemeral port, recording every request.
pub async fn start_fake_upstream<F>(respond: F) -> FakeUpstream
where
    F: Fn(&Recorded) -> Response + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorder = calls.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let recorder = recorder.clone();
        let respond = respond.clone();
        async move {
            let (parts, body) = request.into_parts();
            let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
            let recorded = Recorded {
                method: parts.method,
                path_and_query: parts
                    .uri
                    .path_and_query()
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
                headers: parts.headers,
                body,
            };
            let response = respond(&recorded);
            recorder.lock().unwrap().push(recorded);
            response
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUpstream { addr, calls }
}

/// An address nothing listens on.
pub async fn unreachable_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

pub fn json_response(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

/// Defaults pointed at a plain-HTTP upstream.
pub fn config_for(host: impl Into<String>) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.upstream.scheme = "http".to_string();
    config.upstream.host = host.into();
    config
}

/// Drive one request through a freshly built router.
pub async fn send(config: EdgeConfig, entry: EntryPoint, request: Request<Body>) -> Response {
    HttpServer::new(config, entry)
        .unwrap()
        .router()
        .oneshot(request)
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
