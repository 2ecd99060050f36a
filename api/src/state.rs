//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::config::Config;
use anyhow::{Context, Result};
use shared::fanout::ScanOptions;
use shared::remote::RemoteClient;
use std::path::Path;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the immutable configuration and the HTTP client used to reach
/// peers. Nothing in here changes between requests.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    remote: RemoteClient,
}

impl AppState {
    /// Creates the application state for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the peer HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let remote =
            RemoteClient::new(config.remote_timeout).context("Failed to create peer client")?;

        Ok(Self {
            config: Arc::new(config),
            remote,
        })
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the root of the served log directory.
    #[must_use]
    pub fn log_directory(&self) -> &Path {
        &self.config.log_directory
    }

    /// Returns the options for directory-wide operations.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        self.config.scan_options()
    }

    /// Returns the client used to reach peers.
    #[must_use]
    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }
}
