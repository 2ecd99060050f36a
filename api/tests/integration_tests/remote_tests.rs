//! Integration tests for the remote fan-out endpoint.
//!
//! A second server is started on localhost and used as the peer.

use axum::http::StatusCode;
use serde_json::json;

use super::common::{key, post_json, seeded_log_dir, spawn_peer, test_app};

#[tokio::test]
async fn test_remote_logs_from_peer() {
    let peer_dir = seeded_log_dir();
    let peer = spawn_peer(peer_dir.path()).await;
    let local_dir = seeded_log_dir();
    let app = test_app(local_dir.path());

    let (status, response) = post_json(
        app,
        "/remote",
        json!({ peer.to_string(): { "action": "logs" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let host = format!("http://{peer}");
    assert_eq!(
        response[&host][key(peer_dir.path(), "syslog")],
        json!(["sshd listening", "cron started", "boot ok"])
    );
}

#[tokio::test]
async fn test_remote_mixed_actions() {
    let peer_dir = seeded_log_dir();
    let peer = spawn_peer(peer_dir.path()).await;
    let local_dir = seeded_log_dir();
    let app = test_app(local_dir.path());
    let host = format!("http://{peer}");

    let (status, response) = post_json(
        app,
        "/remote",
        json!({
            host.clone(): { "action": "entries", "file_name": "syslog", "entries": 1 },
            "unused-host": { "action": "bogus" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response[&host],
        json!({ key(peer_dir.path(), "syslog"): ["sshd listening"] })
    );
    assert_eq!(
        response["http://unused-host"],
        json!({ "ERROR": "Unknown action bogus" })
    );
}

#[tokio::test]
async fn test_remote_peer_error_status() {
    let peer_dir = seeded_log_dir();
    let peer = spawn_peer(peer_dir.path()).await;
    let local_dir = seeded_log_dir();
    let app = test_app(local_dir.path());

    let (status, response) = post_json(
        app,
        "/remote",
        json!({ peer.to_string(): { "action": "search", "keyword": "nothing-here" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let host = format!("http://{peer}");
    assert_eq!(
        response[&host]["ERROR"],
        format!("Remote host ({host}) returned status 404")
    );
}

#[tokio::test]
async fn test_remote_requires_hosts() {
    let dir = seeded_log_dir();
    let app = test_app(dir.path());

    let (status, response) = post_json(app, "/remote", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "bad_request");
}
