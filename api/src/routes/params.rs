//! Query parameter sanitization and validation.

use std::num::NonZeroUsize;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Invalid request parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// A required parameter is absent or blank.
    #[error("Missing required parameter '{0}'")]
    Missing(&'static str),

    /// The file name would leave the log directory.
    #[error("Invalid file name '{0}': must be a relative path inside the log directory")]
    InvalidFileName(String),

    /// The entry count is not a positive integer.
    #[error("Parameter 'entries' must be a positive integer, got '{0}'")]
    InvalidEntries(String),
}

/// Trims whitespace and surrounding quotes from a raw parameter value.
#[must_use]
pub fn sanitize(value: &str) -> &str {
    value.trim().trim_matches(|c: char| c == '"' || c == '\'').trim()
}

/// Returns the sanitized value of a required parameter.
///
/// # Errors
///
/// Returns [`ParamError::Missing`] if the value is absent or blank.
pub fn required(name: &'static str, value: Option<&str>) -> Result<String, ParamError> {
    value
        .map(sanitize)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or(ParamError::Missing(name))
}

/// Resolves a file name against the log directory.
///
/// # Errors
///
/// Returns [`ParamError::InvalidFileName`] for absolute paths and paths with
/// `..` components.
pub fn log_file_path(root: &Path, file_name: &str) -> Result<PathBuf, ParamError> {
    let relative = Path::new(file_name);
    let contained = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

    if !contained {
        return Err(ParamError::InvalidFileName(file_name.to_string()));
    }

    Ok(root.join(relative))
}

/// Parses the `entries` parameter.
///
/// # Errors
///
/// Returns [`ParamError::Missing`] if absent and
/// [`ParamError::InvalidEntries`] if not a positive integer.
pub fn entry_count(value: Option<&str>) -> Result<NonZeroUsize, ParamError> {
    let raw = required("entries", value)?;
    raw.parse::<NonZeroUsize>()
        .map_err(|_| ParamError::InvalidEntries(raw))
}
