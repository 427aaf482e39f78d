#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use idstore_api::config::ServerConfig;
use idstore_api::router::build_app_router;
use idstore_api::state::AppState;
use idstore_db::store::MemoryRecordStore;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
    }
}

/// Build the full application router over the given in-memory store, with
/// the same middleware stack production uses.
pub fn build_test_app(store: MemoryRecordStore) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create `n` records through the API and return their JSON.
pub async fn seed(app: &Router, n: usize) -> Vec<Value> {
    let payload: Vec<Value> = (0..n)
        .map(|_| serde_json::json!({ "uuid": uuid::Uuid::new_v4().to_string() }))
        .collect();
    let response = post_json(app.clone(), "/record", Value::Array(payload)).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await.as_array().unwrap().clone()
}

/// Poll `GET /record/{id}` until it returns `status` or `attempts` run out.
///
/// Deletes complete after their response is sent, so a follow-up read may
/// briefly still see the row.
pub async fn wait_for_status(app: &Router, id: i64, status: axum::http::StatusCode) -> bool {
    for _ in 0..50 {
        let response = get(app.clone(), &format!("/record/{id}")).await;
        if response.status() == status {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
