//! Error responses shared by the log routes.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use shared::directory::DirectoryError;
use shared::fanout::FanOutError;
use shared::reader::LogReadError;
use shared::search::SearchError;
use std::fmt::Display;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Error type.
    pub error: String,
    /// Detailed error message.
    pub message: String,
}

/// Status code and body returned by failing handlers.
pub type ErrorResponse = (StatusCode, Json<ApiError>);

impl ApiError {
    fn response(status: StatusCode, error: &str, message: impl Display) -> ErrorResponse {
        (
            status,
            Json(Self {
                error: error.to_string(),
                message: message.to_string(),
            }),
        )
    }

    /// A 400 response for invalid request parameters.
    pub fn bad_request(message: impl Display) -> ErrorResponse {
        Self::response(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// A 500 response for failures that are not the caller's fault.
    pub fn internal(message: impl Display) -> ErrorResponse {
        Self::response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }
}

impl From<LogReadError> for ApiError {
    fn from(e: LogReadError) -> Self {
        let error = match &e {
            LogReadError::NotFound(_) => "file_not_found",
            LogReadError::Empty(_) => "file_empty",
            LogReadError::Io { .. } => "file_unreadable",
        };
        Self {
            error: error.to_string(),
            message: e.to_string(),
        }
    }
}

fn fan_out_error(e: &FanOutError) -> ErrorResponse {
    match e {
        FanOutError::DirectoryNotFound(_) => {
            ApiError::response(StatusCode::NOT_FOUND, "directory_not_found", e)
        }
        FanOutError::Walk(_) => ApiError::internal(e),
    }
}

/// Maps a single-file failure to a response. Every variant is a 404.
pub fn read_error(e: LogReadError) -> ErrorResponse {
    tracing::debug!(error = %e, "Log file read failed");
    (StatusCode::NOT_FOUND, Json(ApiError::from(e)))
}

/// Maps a directory read failure to a response.
pub fn directory_error(e: &DirectoryError) -> ErrorResponse {
    match e {
        DirectoryError::FanOut(inner) => fan_out_error(inner),
        DirectoryError::Empty(_) => ApiError::response(StatusCode::NOT_FOUND, "no_entries", e),
    }
}

/// Maps a search failure to a response.
pub fn search_error(e: &SearchError) -> ErrorResponse {
    match e {
        SearchError::FanOut(inner) => fan_out_error(inner),
        SearchError::KeywordNotFound { .. } => {
            ApiError::response(StatusCode::NOT_FOUND, "keyword_not_found", e)
        }
    }
}
