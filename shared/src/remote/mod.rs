//! Fan-out of log actions to peer instances.
//!
//! A caller hands [`RemoteClient::dispatch`] a map of host to
//! [`RemoteTarget`]. Each target is validated into a [`RemoteAction`],
//! translated into the peer's query-string API and sent concurrently. Every
//! host gets its own result; one failing peer never hides the others.

pub mod action;
pub mod client;

pub use action::{normalize_host, ActionKind, EntryCount, RemoteAction, RemoteTarget};
pub use client::{RemoteClient, RemoteResults, DEFAULT_REMOTE_TIMEOUT, ERROR_KEY};

use thiserror::Error;

/// Errors for a single remote host.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The requested action is not part of the vocabulary.
    #[error("Unknown action {0}")]
    UnknownAction(String),

    /// The action is known but its required parameters are missing.
    #[error("Invalid parameters for {0}.")]
    InvalidParameters(ActionKind),

    /// The host cannot be turned into a request URL.
    #[error("Invalid remote host ({host}): {reason}")]
    InvalidHost {
        /// Host as given, after scheme normalization.
        host: String,
        /// Why the URL could not be built.
        reason: String,
    },

    /// The request did not complete (connection refused, timeout, ...).
    #[error("Remote host ({host}) could not be reached: {source}")]
    Unreachable {
        /// Host the request was sent to.
        host: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The peer answered with a non-success status code.
    #[error("Remote host ({host}) returned status {status}")]
    Status {
        /// Host the request was sent to.
        host: String,
        /// HTTP status code returned by the peer.
        status: u16,
    },

    /// The peer's body is not valid JSON.
    #[error("Remote host ({host}) returned malformed JSON: {source}")]
    MalformedResponse {
        /// Host the request was sent to.
        host: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
