//! Integration tests for health check and the index banner.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;

use super::common::{get, seeded_log_dir, test_app};

#[tokio::test]
async fn test_health_check() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "logscope-api");
}

#[tokio::test]
async fn test_index_is_plain_text() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).starts_with("Logscope"));
}
