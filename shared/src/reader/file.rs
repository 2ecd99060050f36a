//! Whole-file and tail reads for a single log file.

use super::reverse::ReverseLines;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors local to reading one log file.
#[derive(Debug, Error)]
pub enum LogReadError {
    /// The file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but holds no non-empty lines.
    #[error("File is empty: {}", .0.display())]
    Empty(PathBuf),

    /// The file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LogReadError {
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Non-empty lines from `lines`, at most `limit` of them, latest first.
///
/// Stops pulling from the reader as soon as `limit` lines are collected.
fn collect_recent(
    lines: impl IntoIterator<Item = io::Result<String>>,
    limit: Option<NonZeroUsize>,
) -> io::Result<Vec<String>> {
    let limit = limit.map_or(usize::MAX, NonZeroUsize::get);

    let mut entries = Vec::new();
    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        entries.push(line);
        if entries.len() == limit {
            break;
        }
    }

    Ok(entries)
}

fn collect_file(
    path: &Path,
    chunk_size: usize,
    limit: Option<NonZeroUsize>,
) -> Result<Vec<String>, LogReadError> {
    ReverseLines::open(path, chunk_size)
        .and_then(|lines| collect_recent(lines, limit))
        .map_err(|e| LogReadError::from_io(path, e))
}

/// Reads every non-empty line of a log file, most recent first.
///
/// # Errors
///
/// Returns [`LogReadError::NotFound`] if the file does not exist,
/// [`LogReadError::Empty`] if it contains no non-empty lines, and
/// [`LogReadError::Io`] for any other read failure.
///
/// # Example
///
/// ```
/// use shared::reader::{read_all, DEFAULT_CHUNK_SIZE};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("app.log");
/// std::fs::write(&path, "a\nb\nc\n").unwrap();
///
/// assert_eq!(read_all(&path, DEFAULT_CHUNK_SIZE).unwrap(), vec!["c", "b", "a"]);
/// ```
pub fn read_all(path: impl AsRef<Path>, chunk_size: usize) -> Result<Vec<String>, LogReadError> {
    let path = path.as_ref();
    let entries = collect_file(path, chunk_size, None)?;

    if entries.is_empty() {
        return Err(LogReadError::Empty(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), count = entries.len(), "Read log file");
    Ok(entries)
}

/// Reads up to `n` of the most recent non-empty lines of a log file.
///
/// Reading stops as soon as `n` lines have been collected. A file with fewer
/// lines yields all of them, and an empty file yields an empty list.
///
/// # Errors
///
/// Returns [`LogReadError::NotFound`] if the file does not exist and
/// [`LogReadError::Io`] for any other read failure.
pub fn read_last(
    path: impl AsRef<Path>,
    n: NonZeroUsize,
    chunk_size: usize,
) -> Result<Vec<String>, LogReadError> {
    let path = path.as_ref();
    let entries = collect_file(path, chunk_size, Some(n))?;

    tracing::debug!(
        path = %path.display(),
        requested = n.get(),
        count = entries.len(),
        "Read most recent log entries"
    );
    Ok(entries)
}
