//! Reading every log file in a directory.

use crate::fanout::{fan_out, FanOut, FanOutError, ScanOptions};
use crate::reader::{read_all, LogReadError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Whole-directory read failures.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory could not be scanned.
    #[error(transparent)]
    FanOut(#[from] FanOutError),

    /// No file in the directory produced any entries.
    #[error("No log entries found in {}", .0.display())]
    Empty(PathBuf),
}

/// Reads all non-empty lines of every file below `root`, latest first.
///
/// Empty files are left out of the result. Files that cannot be read are
/// listed in [`FanOut::failures`] without affecting the others.
///
/// # Errors
///
/// Returns [`DirectoryError::FanOut`] if `root` cannot be scanned and
/// [`DirectoryError::Empty`] if no file had any entries.
pub async fn read_all_directory(
    root: &Path,
    options: ScanOptions,
) -> Result<FanOut<Vec<String>>, DirectoryError> {
    let chunk_size = options.chunk_size;

    let result = fan_out(root, options.max_concurrency, move |path: &Path| {
        match read_all(path, chunk_size) {
            Ok(lines) => Ok(Some(lines)),
            Err(LogReadError::Empty(_)) => Ok(None),
            Err(e) => Err(e),
        }
    })
    .await?;

    if result.is_empty() {
        return Err(DirectoryError::Empty(root.to_path_buf()));
    }

    tracing::debug!(
        root = %root.display(),
        files = result.entries.len(),
        failures = result.failures.len(),
        "Read log directory"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_all_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.log"), "one\ntwo\n").unwrap();
        fs::create_dir(dir.path().join("nginx")).unwrap();
        fs::write(dir.path().join("nginx/access.log"), "GET /\n").unwrap();

        let result = read_all_directory(dir.path(), ScanOptions::default())
            .await
            .unwrap();

        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[&dir.path().join("app.log")], vec!["two", "one"]);
        assert_eq!(result.entries[&dir.path().join("nginx/access.log")], vec!["GET /"]);
    }

    #[tokio::test]
    async fn test_empty_files_are_left_out() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.log"), "one\n").unwrap();
        fs::write(dir.path().join("empty.log"), "").unwrap();

        let result = read_all_directory(dir.path(), ScanOptions::default())
            .await
            .unwrap();

        assert_eq!(result.entries.len(), 1);
        assert!(result.failures.is_empty());
        assert_eq!(result.files_scanned, 2);
    }

    #[tokio::test]
    async fn test_directory_without_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.log"), "\n\n").unwrap();

        let result = read_all_directory(dir.path(), ScanOptions::default()).await;

        assert!(matches!(result, Err(DirectoryError::Empty(_))));
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = TempDir::new().unwrap();

        let result = read_all_directory(&dir.path().join("missing"), ScanOptions::default()).await;

        assert!(matches!(
            result,
            Err(DirectoryError::FanOut(FanOutError::DirectoryNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_small_chunks_give_same_result() {
        let dir = TempDir::new().unwrap();
        let content: String = (0..200).map(|i| format!("line {i}\n")).collect();
        fs::write(dir.path().join("app.log"), &content).unwrap();

        let small = read_all_directory(dir.path(), ScanOptions::new().with_chunk_size(7))
            .await
            .unwrap();
        let large = read_all_directory(dir.path(), ScanOptions::default())
            .await
            .unwrap();

        assert_eq!(small.entries, large.entries);
        assert_eq!(small.entries[&dir.path().join("app.log")].len(), 200);
    }
}
