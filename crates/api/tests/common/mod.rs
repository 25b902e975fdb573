#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use breaktime_api::config::{AdminCredentials, ServerConfig};
use breaktime_api::router::build_app_router;
use breaktime_api::state::AppState;
use breaktime_db::BreakStore;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "s3cret";

/// Build a test `ServerConfig` with every path inside `dir`.
///
/// Auth is disabled and the NTP server points at a closed local port with a
/// short timeout.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_path: dir.path().join("data").join("breaks.db"),
        seed_path: dir.path().join("breaks.json"),
        static_dir: dir.path().join("frontend"),
        sounds_dir: dir.path().join("sounds"),
        max_upload_bytes: 1024,
        admin: None,
        ntp_server: "127.0.0.1:9".to_string(),
        ntp_timeout_secs: 1,
    }
}

/// Same as [`test_config`] with admin credentials enabled.
pub fn test_config_with_auth(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        admin: Some(AdminCredentials {
            username: ADMIN_USER.to_string(),
            password: ADMIN_PASS.to_string(),
        }),
        ..test_config(dir)
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over a fresh SQLite file.
pub async fn build_test_app_with(config: ServerConfig) -> Router {
    let pool = breaktime_db::create_pool(&config.database_path)
        .await
        .expect("pool should open");
    let store = BreakStore::open(pool.clone());
    store.initialize().await.expect("migrations should apply");

    let state = AppState {
        pool,
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn build_test_app(dir: &TempDir) -> Router {
    build_test_app_with(test_config(dir)).await
}

pub fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// A `multipart/form-data` request with a single `file` part.
pub fn multipart_upload(uri: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "breaktime-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
