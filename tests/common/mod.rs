//! Shared helpers: a fake Notion API and relay router construction.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use http_body_util::BodyExt;
use mt5_notion_relay::config::RelayConfig;
use mt5_notion_relay::state::AppState;
use mt5_notion_relay::webhook::build_router;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// One request seen by the fake Notion API
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct FakeNotionState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    body: String,
}

/// Local stand-in for `https://api.notion.com`
pub struct FakeNotion {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeNotion {
    /// Answers every page creation with `status` and `body`
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeNotionState {
            requests: requests.clone(),
            status,
            body: body.to_string(),
        };

        let app = Router::new()
            .route("/v1/pages", post(create_page))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub async fn created(page_id: &str) -> Self {
        let body = serde_json::json!({"object": "page", "id": page_id}).to_string();
        Self::start(StatusCode::OK, &body).await
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn create_page(
    State(state): State<FakeNotionState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state
        .requests
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, body });
    (state.status, state.body.clone())
}

pub fn config_with(pairs: &[(&str, &str)]) -> RelayConfig {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RelayConfig::from_lookup(|key| map.get(key).cloned()).unwrap()
}

/// Config with credentials, pointed at `api_url`
pub fn configured(api_url: &str) -> RelayConfig {
    config_with(&[
        ("NOTION_TOKEN", "secret_test_token"),
        ("NOTION_DATABASE_ID", "db-1234"),
        ("NOTION_API_URL", api_url),
        ("NOTION_TIMEOUT_SECS", "5"),
    ])
}

pub fn relay_app(config: RelayConfig) -> Router {
    build_router(Arc::new(AppState::new(config).unwrap()))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    post_with_content_type(app, uri, Some("application/json"), body).await
}

/// POST `body` with the given `Content-Type`, or none at all
pub async fn post_with_content_type(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
