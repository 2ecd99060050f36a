//! Peer fan-out endpoint.
//!
//! Forwards log actions to other Logscope instances and returns their answers
//! keyed by host.

use super::error::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use shared::remote::RemoteTarget;
use std::collections::HashMap;

/// Creates the remote fan-out routes.
///
/// # Routes
///
/// - `POST /remote` - body `{"<host>": {"action": ..., ...}, ...}`
pub fn remote_routes(state: AppState) -> Router {
    Router::new()
        .route("/remote", post(dispatch_remote))
        .with_state(state)
}

/// Handler for `POST /remote`.
///
/// Every host gets an entry in the response: the peer's JSON on success or
/// `{"ERROR": "<message>"}` on failure.
async fn dispatch_remote(
    State(state): State<AppState>,
    payload: Result<Json<HashMap<String, RemoteTarget>>, JsonRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let Json(targets) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    if targets.is_empty() {
        return Err(ApiError::bad_request("At least one remote host is required"));
    }

    tracing::debug!(hosts = targets.len(), "Dispatching to remote hosts");
    let results = state.remote().dispatch(targets).await;

    Ok(Json(results.into_json()))
}
