//! API route definitions.
//!
//! This module organizes all HTTP routes for the Logscope API server.

mod error;
mod health;
mod logs;
mod params;
mod remote;
mod search;

pub use error::ApiError;
pub use health::{health_routes, index_routes};
pub use logs::logs_routes;
pub use remote::remote_routes;
pub use search::search_routes;

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Response body of the read and search endpoints: lines keyed by file path.
pub type EntriesByPath = BTreeMap<String, Vec<String>>;

fn entries_by_path(entries: HashMap<PathBuf, Vec<String>>) -> EntriesByPath {
    entries
        .into_iter()
        .map(|(path, lines)| (path.display().to_string(), lines))
        .collect()
}
