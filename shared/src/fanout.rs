//! Directory fan-out engine.
//!
//! Walks a directory tree and runs one blocking per-file operation per file,
//! concurrently, merging the outcomes into a single [`FanOut`] keyed by path.
//! A failing file never aborts its siblings: its error is recorded in
//! [`FanOut::failures`] and the walk carries on.

use crate::reader::DEFAULT_CHUNK_SIZE;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use walkdir::WalkDir;

/// Default cap on per-file operations running at the same time.
pub const DEFAULT_MAX_CONCURRENCY: usize = 64;

/// Whole-operation failures of a directory fan-out.
#[derive(Debug, Error)]
pub enum FanOutError {
    /// The root does not exist or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Listing the directory tree failed.
    #[error("Failed to walk directory: {0}")]
    Walk(String),
}

/// Tuning knobs shared by the directory-wide operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Bytes read per backward step by the reverse line reader.
    pub chunk_size: usize,
    /// Maximum number of files processed at once.
    pub max_concurrency: usize,
}

impl ScanOptions {
    /// Creates options with the default chunk size and concurrency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reverse reader chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the maximum number of files processed at once.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Merged outcome of a fan-out over a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOut<T> {
    /// Successful results keyed by file path.
    pub entries: HashMap<PathBuf, T>,
    /// Error messages of files whose operation failed.
    pub failures: HashMap<PathBuf, String>,
    /// Number of files the operation was run on.
    pub files_scanned: usize,
}

impl<T> FanOut<T> {
    /// Returns `true` if no file produced a result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for FanOut<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            failures: HashMap::new(),
            files_scanned: 0,
        }
    }
}

enum Outcome<T> {
    Found(T),
    Skipped,
    Failed(String),
}

/// Lists every non-directory entry below `root`, skipping unreadable subtrees.
fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) if !entry.file_type().is_dir() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable part of log directory");
            }
        }
    }

    files
}

/// Runs `op` on every file below `root` and merges the results.
///
/// `op` returns `Ok(Some(value))` to contribute an entry, `Ok(None)` to leave
/// the file out, or `Err` to record a per-file failure. Operations run on the
/// blocking thread pool, at most `max_concurrency` at a time, and the call
/// returns only once all of them have finished.
///
/// # Errors
///
/// Returns [`FanOutError::DirectoryNotFound`] if `root` is not a directory and
/// [`FanOutError::Walk`] if the directory listing task fails.
pub async fn fan_out<T, E, F>(
    root: &Path,
    max_concurrency: usize,
    op: F,
) -> Result<FanOut<T>, FanOutError>
where
    F: Fn(&Path) -> Result<Option<T>, E> + Send + Sync + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    match tokio::fs::metadata(root).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => return Err(FanOutError::DirectoryNotFound(root.to_path_buf())),
    }

    let walk_root = root.to_path_buf();
    let files = tokio::task::spawn_blocking(move || list_files(&walk_root))
        .await
        .map_err(|e| FanOutError::Walk(e.to_string()))?;

    tracing::debug!(root = %root.display(), files = files.len(), "Fanning out over log directory");

    let op = Arc::new(op);
    let permits = Arc::new(Semaphore::new(
        max_concurrency.clamp(1, Semaphore::MAX_PERMITS),
    ));
    let mut tasks = JoinSet::new();
    let mut pending = HashMap::with_capacity(files.len());

    for path in files {
        let op = Arc::clone(&op);
        let permits = Arc::clone(&permits);
        let task_path = path.clone();

        let handle = tasks.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return Outcome::Failed("scheduler closed".to_string());
            };

            match tokio::task::spawn_blocking(move || (*op)(&task_path)).await {
                Ok(Ok(Some(value))) => Outcome::Found(value),
                Ok(Ok(None)) => Outcome::Skipped,
                Ok(Err(e)) => Outcome::Failed(e.to_string()),
                Err(e) => Outcome::Failed(format!("task failed: {e}")),
            }
        });
        pending.insert(handle.id(), path);
    }

    Ok(merge_outcomes(tasks, pending).await)
}

/// Drains `tasks`, attributing each outcome to its file through `pending`.
///
/// A task that fails to join still counts as scanned and lands in `failures`.
async fn merge_outcomes<T: 'static>(
    mut tasks: JoinSet<Outcome<T>>,
    mut pending: HashMap<Id, PathBuf>,
) -> FanOut<T> {
    let mut merged = FanOut::default();

    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, outcome) = match joined {
            Ok(done) => done,
            Err(e) => {
                tracing::error!(error = %e, "Fan-out task aborted");
                (e.id(), Outcome::Failed(format!("task failed: {e}")))
            }
        };
        let Some(path) = pending.remove(&id) else {
            continue;
        };

        merged.files_scanned += 1;
        match outcome {
            Outcome::Found(value) => {
                merged.entries.insert(path, value);
            }
            Outcome::Skipped => {}
            Outcome::Failed(message) => {
                tracing::warn!(path = %path.display(), error = %message, "Log file skipped");
                merged.failures.insert(path, message);
            }
        }
    }

    merged
}
