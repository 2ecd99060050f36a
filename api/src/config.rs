//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Context, Result};
use shared::fanout::{ScanOptions, DEFAULT_MAX_CONCURRENCY};
use shared::reader::{clamp_chunk_size, DEFAULT_CHUNK_SIZE};
use shared::remote::DEFAULT_REMOTE_TIMEOUT;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `LOGSCOPE_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `LOGSCOPE_PORT`: The port to listen on (default: 8080)
/// - `LOG_DIRECTORY`: The directory of log files to expose (default: "/var/log")
/// - `LOGSCOPE_CHUNK_SIZE`: Bytes read per backward step, clamped to 1 KiB..1 MiB
///   (default: 65536)
/// - `LOGSCOPE_MAX_CONCURRENCY`: Files processed at once (default: 64)
/// - `LOGSCOPE_REMOTE_TIMEOUT_SECS`: Timeout for peer requests (default: 10)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Root of the log files served by this instance.
    pub log_directory: PathBuf,
    /// Bytes read per backward step when reading files from the end.
    pub chunk_size: usize,
    /// Maximum number of files processed concurrently.
    pub max_concurrency: usize,
    /// Timeout for a single request to a peer.
    pub remote_timeout: Duration,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `LOGSCOPE_PORT` is set but cannot be parsed as a valid port number
    /// - `LOGSCOPE_CHUNK_SIZE`, `LOGSCOPE_MAX_CONCURRENCY` or
    ///   `LOGSCOPE_REMOTE_TIMEOUT_SECS` is set but is not a number
    /// - `LOGSCOPE_MAX_CONCURRENCY` is zero
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("LOGSCOPE_HOST").unwrap_or(defaults.host);
        let port = env_parse("LOGSCOPE_PORT")?.unwrap_or(defaults.port);
        let log_directory = std::env::var_os("LOG_DIRECTORY")
            .map_or(defaults.log_directory, PathBuf::from);
        let chunk_size = env_parse("LOGSCOPE_CHUNK_SIZE")?
            .map_or(defaults.chunk_size, clamp_chunk_size);
        let max_concurrency =
            env_parse("LOGSCOPE_MAX_CONCURRENCY")?.unwrap_or(defaults.max_concurrency);
        let remote_timeout = env_parse("LOGSCOPE_REMOTE_TIMEOUT_SECS")?
            .map_or(defaults.remote_timeout, Duration::from_secs);

        if max_concurrency == 0 {
            bail!("LOGSCOPE_MAX_CONCURRENCY must be greater than zero");
        }

        Ok(Self {
            host,
            port,
            log_directory,
            chunk_size,
            max_concurrency,
            remote_timeout,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port combination cannot be parsed as a
    /// valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Returns the options used for directory-wide operations.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new()
            .with_chunk_size(self.chunk_size)
            .with_max_concurrency(self.max_concurrency)
    }

    /// Sets the log directory.
    #[must_use]
    pub fn with_log_directory(mut self, log_directory: impl Into<PathBuf>) -> Self {
        self.log_directory = log_directory.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_directory: PathBuf::from("/var/log"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

/// Parses an optional numeric environment variable.
fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(name)
        .ok()
        .map(|value| value.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("Invalid value for {name}"))
}
