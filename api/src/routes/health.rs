//! Health check and index endpoints.
//!
//! Provides a simple health check endpoint for load balancers and monitoring systems,
//! and a plain-text banner at the root.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Creates the health check routes.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Creates the root banner route.
pub fn index_routes() -> Router {
    Router::new().route("/", get(index))
}

/// Root handler.
async fn index() -> &'static str {
    "Logscope log server. See /logs, /log, /search and /remote."
}

/// Health check handler.
///
/// Returns a simple JSON response indicating the service is healthy.
/// This endpoint is intended for use by load balancers and monitoring systems.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "logscope-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}
