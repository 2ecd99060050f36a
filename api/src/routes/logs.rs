//! Log read endpoints.
//!
//! Serves every log in the configured directory, a single file, or the most
//! recent entries of a file.

use super::error::{directory_error, read_error, ApiError, ErrorResponse};
use super::params::{entry_count, log_file_path, required};
use super::EntriesByPath;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::directory::read_all_directory;
use shared::reader::{read_all, read_last};

/// Query parameters for `GET /log`.
#[derive(Debug, Deserialize)]
pub struct FileParams {
    /// File name relative to the log directory.
    pub file: Option<String>,
}

/// Query parameters for `GET /log/{file}`.
#[derive(Debug, Deserialize)]
pub struct EntriesParams {
    /// Number of most recent entries to return.
    pub entries: Option<String>,
}

/// Creates the log read routes.
///
/// # Routes
///
/// - `GET /logs` - Every log file, entries latest first
/// - `GET /log?file=<name>` - One log file, entries latest first
/// - `GET /log/{file}?entries=<n>` - The `n` most recent entries of a file
pub fn logs_routes(state: AppState) -> Router {
    Router::new()
        .route("/logs", get(get_all_logs))
        .route("/log", get(get_log_file))
        .route("/log/{file}", get(get_log_entries))
        .with_state(state)
}

/// Handler for `GET /logs`.
async fn get_all_logs(
    State(state): State<AppState>,
) -> Result<Json<EntriesByPath>, ErrorResponse> {
    let result = read_all_directory(state.log_directory(), state.scan_options())
        .await
        .map_err(|e| directory_error(&e))?;

    Ok(Json(super::entries_by_path(result.entries)))
}

/// Handler for `GET /log`.
async fn get_log_file(
    State(state): State<AppState>,
    Query(params): Query<FileParams>,
) -> Result<Json<EntriesByPath>, ErrorResponse> {
    let file = required("file", params.file.as_deref()).map_err(ApiError::bad_request)?;
    let path = log_file_path(state.log_directory(), &file).map_err(ApiError::bad_request)?;
    let chunk_size = state.config().chunk_size;

    let read_path = path.clone();
    let lines = tokio::task::spawn_blocking(move || read_all(&read_path, chunk_size))
        .await
        .map_err(ApiError::internal)?
        .map_err(read_error)?;

    Ok(Json(EntriesByPath::from([(path.display().to_string(), lines)])))
}

/// Handler for `GET /log/{file}`.
async fn get_log_entries(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(params): Query<EntriesParams>,
) -> Result<Json<EntriesByPath>, ErrorResponse> {
    let file = required("file", Some(&file)).map_err(ApiError::bad_request)?;
    let count = entry_count(params.entries.as_deref()).map_err(ApiError::bad_request)?;
    let path = log_file_path(state.log_directory(), &file).map_err(ApiError::bad_request)?;
    let chunk_size = state.config().chunk_size;

    let read_path = path.clone();
    let lines = tokio::task::spawn_blocking(move || read_last(&read_path, count, chunk_size))
        .await
        .map_err(ApiError::internal)?
        .map_err(read_error)?;

    Ok(Json(EntriesByPath::from([(path.display().to_string(), lines)])))
}
