//! Integration tests for the read endpoints.
//!
//! Tests cover:
//! - Whole-directory reads, newest line first
//! - Single file reads, including nested files
//! - Recent-entry reads
//! - Error responses for missing, empty and escaping file names

use axum::http::StatusCode;
use serde_json::json;

use super::common::{get, key, seeded_log_dir, test_app};

#[tokio::test]
async fn test_read_all_logs_newest_first() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({
            key(dir.path(), "syslog"): ["sshd listening", "cron started", "boot ok"],
            key(dir.path(), "app/app.log"): [
                "gave up",
                "disk full on /var",
                "retrying",
                "disk full on /data"
            ]
        })
    );
}

#[tokio::test]
async fn test_read_all_logs_skips_empty_files() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (_, response) = get(app, "/logs").await;
    assert!(response.get(key(dir.path(), "empty.log")).is_none());
}

#[tokio::test]
async fn test_read_one_log() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/log?file=syslog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ key(dir.path(), "syslog"): ["sshd listening", "cron started", "boot ok"] })
    );
}

#[tokio::test]
async fn test_read_nested_log() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/log?file=app/app.log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response[key(dir.path(), "app/app.log")][0], "gave up");
}

#[tokio::test]
async fn test_read_recent_entries() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/log/syslog?entries=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ key(dir.path(), "syslog"): ["sshd listening", "cron started"] })
    );
}

#[tokio::test]
async fn test_read_recent_entries_beyond_file_length() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/log/syslog?entries=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response[key(dir.path(), "syslog")].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_read_missing_log() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/log?file=nope.log").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "file_not_found");
}

#[tokio::test]
async fn test_read_empty_log() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = get(app, "/log?file=empty.log").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "file_empty");
}

#[tokio::test]
async fn test_read_rejects_parent_directory() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, _) = get(app, "/log?file=../etc/passwd").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_read_rejects_zero_entries() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, _) = get(app, "/log/syslog?entries=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_read_all_missing_directory() {
    let dir = seeded_log_dir();
    let app = test_app(&dir.path().join("does-not-exist"));

    let (status, response) = get(app, "/logs").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "directory_not_found");
}
