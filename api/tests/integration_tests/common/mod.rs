//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup over a temporary log directory and HTTP request helpers.

use api::{create_router, AppState, Config};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use tempfile::TempDir;

/// Creates a temporary log directory seeded with a small, known set of files.
///
/// Layout:
/// - `syslog` - three lines, oldest first
/// - `app/app.log` - mixed lines, two containing `disk full`
/// - `empty.log` - zero bytes
pub fn seeded_log_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("syslog"),
        "boot ok\ncron started\nsshd listening\n",
    )
    .unwrap();
    fs::create_dir(dir.path().join("app")).unwrap();
    fs::write(
        dir.path().join("app").join("app.log"),
        "disk full on /data\nretrying\ndisk full on /var\ngave up\n",
    )
    .unwrap();
    fs::write(dir.path().join("empty.log"), "").unwrap();
    dir
}

/// Creates a test router serving the given log directory.
pub fn test_app(log_directory: &Path) -> Router {
    let config = Config::default().with_log_directory(log_directory);
    create_router(AppState::new(config).unwrap())
}

/// Starts a real server for the given log directory on an ephemeral port.
///
/// The server runs until the test runtime shuts down.
pub async fn spawn_peer(log_directory: &Path) -> SocketAddr {
    let app = test_app(log_directory);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Absolute path of `relative` inside `dir`, as it appears in response keys.
pub fn key(dir: &Path, relative: &str) -> String {
    dir.join(relative).display().to_string()
}

/// Helper to make a POST request with JSON body.
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a GET request.
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}
