//! Concurrent HTTP client for peer instances.

use super::action::{normalize_host, RemoteAction, RemoteTarget};
use super::RemoteError;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::task::JoinSet;

/// Default timeout for one peer request.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Key used for per-host error messages in JSON output.
pub const ERROR_KEY: &str = "ERROR";

/// Per-host outcomes of a dispatch, keyed by the normalized host.
#[derive(Debug, Default)]
pub struct RemoteResults {
    results: HashMap<String, Result<Value, RemoteError>>,
}

impl RemoteResults {
    /// Returns the outcome for `host` (including its scheme).
    #[must_use]
    pub fn get(&self, host: &str) -> Option<&Result<Value, RemoteError>> {
        self.results.get(host)
    }

    /// Returns the number of hosts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if no host was dispatched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over hosts and their outcomes.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Result<Value, RemoteError>)> {
        self.results.iter()
    }

    /// Renders the results as one JSON object.
    ///
    /// Successful hosts map to the peer's JSON payload; failed hosts map to
    /// `{"ERROR": "<message>"}`.
    #[must_use]
    pub fn into_json(self) -> Value {
        let object: Map<String, Value> = self
            .results
            .into_iter()
            .map(|(host, result)| {
                let value = result.unwrap_or_else(|e| json!({ ERROR_KEY: e.to_string() }));
                (host, value)
            })
            .collect();
        Value::Object(object)
    }
}

/// HTTP client that forwards actions to peer instances.
///
/// # Example
///
/// ```no_run
/// use shared::remote::{RemoteClient, RemoteTarget, DEFAULT_REMOTE_TIMEOUT};
/// use std::collections::HashMap;
///
/// # async fn example() -> Result<(), shared::remote::RemoteError> {
/// let client = RemoteClient::new(DEFAULT_REMOTE_TIMEOUT)?;
///
/// let mut targets = HashMap::new();
/// targets.insert("10.0.0.2:8080".to_string(), RemoteTarget::new("logs"));
/// targets.insert(
///     "10.0.0.3:8080".to_string(),
///     RemoteTarget::new("search").with_keyword("timeout"),
/// );
///
/// let results = client.dispatch(targets).await;
/// println!("{}", results.into_json());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
}

impl RemoteClient {
    /// Creates a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Client`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self { client })
    }

    /// Performs one action against one peer and returns its JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the host is invalid, the peer cannot be
    /// reached, answers with a non-2xx status, or sends malformed JSON.
    pub async fn fetch(&self, host: &str, action: &RemoteAction) -> Result<Value, RemoteError> {
        let host = normalize_host(host);
        let url = action.url(&host)?;

        tracing::debug!(%url, action = %action.kind(), "Calling remote host");
        self.get_json(host, url).await
    }

    /// Asks a peer for its health report.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RemoteClient::fetch`].
    pub async fn health(&self, host: &str) -> Result<Value, RemoteError> {
        let host = normalize_host(host);
        let mut url = reqwest::Url::parse(&host).map_err(|e| RemoteError::InvalidHost {
            host: host.clone(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|()| RemoteError::InvalidHost {
                host: host.clone(),
                reason: "cannot be used as a base URL".to_string(),
            })?
            .pop_if_empty()
            .push("health");

        tracing::debug!(%url, "Checking remote host health");
        self.get_json(host, url).await
    }

    async fn get_json(&self, host: String, url: reqwest::Url) -> Result<Value, RemoteError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| RemoteError::Unreachable {
                host: host.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                host,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| RemoteError::MalformedResponse { host, source })
    }

    /// Sends every target to its host concurrently and waits for all of them.
    ///
    /// Each host's failure is recorded under that host only; the other hosts
    /// are unaffected. Inputs that normalize to the same host (`peer` and
    /// `http://peer`) are sent once: the input that sorts last wins.
    pub async fn dispatch(&self, targets: HashMap<String, RemoteTarget>) -> RemoteResults {
        let mut inputs: Vec<_> = targets.into_iter().collect();
        inputs.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut by_host = BTreeMap::new();
        for (host, target) in inputs {
            let key = normalize_host(&host);
            if by_host.insert(key.clone(), target).is_some() {
                tracing::warn!(host = %key, input = %host, "Duplicate remote host, keeping later target");
            }
        }

        let mut tasks = JoinSet::new();
        for (host, target) in by_host {
            let client = self.clone();
            tasks.spawn(async move {
                let result = match RemoteAction::try_from(&target) {
                    Ok(action) => client.fetch(&host, &action).await,
                    Err(e) => Err(e),
                };
                (host, result)
            });
        }

        let mut merged = RemoteResults::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((host, result)) => {
                    if let Err(e) = &result {
                        tracing::warn!(%host, error = %e, "Remote host failed");
                    }
                    merged.results.insert(host, result);
                }
                Err(e) => tracing::error!(error = %e, "Remote dispatch task aborted"),
            }
        }

        merged
    }
}
