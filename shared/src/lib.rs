//! Logscope Shared Library
//!
//! Core operations behind the Logscope server: reading append-only log files
//! from the end, fanning an operation out over every file in a directory,
//! keyword search, and forwarding the same actions to peer instances.
//!
//! # Modules
//!
//! - [`reader`] - Reverse line reader and single-file reads
//! - [`fanout`] - Concurrent per-file operations over a directory tree
//! - [`directory`] - Reading every file of a directory
//! - [`search`] - Keyword search over a directory
//! - [`remote`] - Concurrent HTTP fan-out to peer instances
//!
//! None of these read the process environment; the log directory and all
//! tuning values are passed in by the caller.
//!
//! # Example
//!
//! ```
//! use shared::fanout::ScanOptions;
//! use shared::search::search_directory;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("f1"), "x\n").unwrap();
//! std::fs::write(dir.path().join("f2"), "y\n").unwrap();
//!
//! let found = search_directory(dir.path(), "x", ScanOptions::default())
//!     .await
//!     .unwrap();
//!
//! assert_eq!(found.entries[&dir.path().join("f1")], vec!["x"]);
//! assert!(!found.entries.contains_key(&dir.path().join("f2")));
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod directory;
pub mod fanout;
pub mod reader;
pub mod remote;
pub mod search;

/// Re-export common dependencies for convenience.
pub use serde;
pub use serde_json;
