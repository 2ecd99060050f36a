//! Keyword search across log files.
//!
//! Unlike tail reads, search scans each file forward so that matches come
//! back in the order they appear in the file.

use crate::fanout::{fan_out, FanOut, FanOutError, ScanOptions};
use crate::reader::LogReadError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Whole-directory search failures.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The directory could not be scanned.
    #[error(transparent)]
    FanOut(#[from] FanOutError),

    /// No line in any file contains the keyword.
    #[error("Keyword '{keyword}' was not found in any file in the {} directory.", directory.display())]
    KeywordNotFound {
        /// The keyword that was searched for.
        keyword: String,
        /// The directory that was searched.
        directory: PathBuf,
    },
}

/// Collects the lines of one file that contain `keyword`, in file order.
///
/// Matching is a case-sensitive substring test. Returns `Ok(None)` when no
/// line matches.
///
/// # Errors
///
/// Returns a [`LogReadError`] if the file cannot be opened or read.
pub fn search_file(path: &Path, keyword: &str) -> Result<Option<Vec<String>>, LogReadError> {
    let file = File::open(path).map_err(|e| LogReadError::from_io(path, e))?;
    let mut reader = BufReader::new(file);

    let mut matches = Vec::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        let read = reader
            .read_until(b'\n', &mut raw)
            .map_err(|e| LogReadError::from_io(path, e))?;
        if read == 0 {
            break;
        }

        let bytes = raw.strip_suffix(b"\n").unwrap_or(&raw[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let line = String::from_utf8_lossy(bytes);
        if line.contains(keyword) {
            matches.push(line.into_owned());
        }
    }

    Ok((!matches.is_empty()).then_some(matches))
}

/// Searches every file below `root` for lines containing `keyword`.
///
/// Files without matches are absent from the result.
///
/// # Errors
///
/// Returns [`SearchError::FanOut`] if `root` cannot be scanned and
/// [`SearchError::KeywordNotFound`] if no file contains the keyword.
pub async fn search_directory(
    root: &Path,
    keyword: &str,
    options: ScanOptions,
) -> Result<FanOut<Vec<String>>, SearchError> {
    let needle = keyword.to_string();
    let result = fan_out(root, options.max_concurrency, move |path: &Path| {
        search_file(path, &needle)
    })
    .await?;

    if result.is_empty() {
        return Err(SearchError::KeywordNotFound {
            keyword: keyword.to_string(),
            directory: root.to_path_buf(),
        });
    }

    tracing::debug!(
        root = %root.display(),
        keyword,
        files = result.entries.len(),
        "Keyword search complete"
    );
    Ok(result)
}
