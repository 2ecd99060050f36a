//! Keyword search endpoint.

use super::error::{search_error, ApiError, ErrorResponse};
use super::params::required;
use super::EntriesByPath;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::search::search_directory;

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Literal, case-sensitive text to look for.
    pub keyword: Option<String>,
}

/// Creates the search routes.
pub fn search_routes(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search_logs))
        .with_state(state)
}

/// Handler for `GET /search`.
///
/// Returns the matching lines of every file that has any, in file order.
async fn search_logs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<EntriesByPath>, ErrorResponse> {
    let keyword = required("keyword", params.keyword.as_deref()).map_err(ApiError::bad_request)?;

    let result = search_directory(state.log_directory(), &keyword, state.scan_options())
        .await
        .map_err(|e| search_error(&e))?;

    Ok(Json(super::entries_by_path(result.entries)))
}
