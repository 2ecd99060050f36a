//! Integration tests for keyword search.

use axum::http::StatusCode;
use serde_json::json;

use super::common::{get, key, seeded_log_dir, test_app};

#[tokio::test]
async fn test_search_across_directory() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let uri = format!("/search?keyword={}", urlencoding::encode("disk full"));
    let (status, response) = get(app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ key(dir.path(), "app/app.log"): ["disk full on /data", "disk full on /var"] })
    );
}

#[tokio::test]
async fn test_search_is_case_sensitive() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/search?keyword=SSHD").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "keyword_not_found");
}

#[tokio::test]
async fn test_search_matches_several_files() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    // "o" appears in "boot ok" and in "disk full on ..."
    let (status, response) = get(app, "/search?keyword=o").await;
    assert_eq!(status, StatusCode::OK);
    let files = response.as_object().unwrap();
    assert!(files.contains_key(&key(dir.path(), "syslog")));
    assert!(files.contains_key(&key(dir.path(), "app/app.log")));
}

#[tokio::test]
async fn test_search_missing_keyword() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/search?keyword=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "bad_request");
}
