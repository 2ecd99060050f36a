//! Remote actions and the URLs they map to on a peer.

use super::RemoteError;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::num::NonZeroUsize;

/// A request for one peer, as received over the wire.
///
/// Only the fields required by `action` need to be set; see
/// [`RemoteAction::try_from`] for the rules. Fields of the wrong JSON type
/// deserialize as unusable values instead of failing, so a malformed target
/// only affects its own host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTarget {
    /// One of `logs`, `log`, `search` or `entries`.
    #[serde(default, deserialize_with = "action_name")]
    pub action: String,

    /// File name for `log` and `entries`.
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_name: Option<String>,

    /// Number of entries for `entries`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<EntryCount>,

    /// Keyword for `search`.
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub keyword: Option<String>,
}

/// Non-string action values are kept in their JSON form for the error message.
fn action_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl RemoteTarget {
    /// Creates a target for `action` with no parameters.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Sets the file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the entry count.
    #[must_use]
    pub fn with_entries(mut self, entries: i64) -> Self {
        self.entries = Some(EntryCount::Number(entries));
        self
    }

    /// Sets the search keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// Entry count as sent by callers, normally a JSON integer or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryCount {
    /// A JSON integer.
    Number(i64),
    /// A string such as `"10"`.
    Text(String),
    /// Anything else (floats, booleans, arrays, ...), never a valid count.
    Other(Value),
}

impl EntryCount {
    /// Returns the count if it is a positive integer.
    #[must_use]
    pub fn positive(&self) -> Option<NonZeroUsize> {
        match self {
            Self::Number(n) => usize::try_from(*n).ok().and_then(NonZeroUsize::new),
            Self::Text(s) => s.trim().parse::<NonZeroUsize>().ok(),
            Self::Other(_) => None,
        }
    }
}

/// The action vocabulary understood by peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Every log in the peer's directory.
    Logs,
    /// One file.
    Log,
    /// Keyword search over the peer's directory.
    Search,
    /// The most recent entries of one file.
    Entries,
}

impl ActionKind {
    /// Parses an action name, returning `None` for anything unknown.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "logs" => Some(Self::Logs),
            "log" => Some(Self::Log),
            "search" => Some(Self::Search),
            "entries" => Some(Self::Entries),
            _ => None,
        }
    }

    /// Returns the wire name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logs => "logs",
            Self::Log => "log",
            Self::Search => "search",
            Self::Entries => "entries",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated action together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAction {
    /// `GET /logs`
    Logs,
    /// `GET /log?file=<file_name>`
    Log {
        /// File to read.
        file_name: String,
    },
    /// `GET /search?keyword=<keyword>`
    Search {
        /// Keyword to look for.
        keyword: String,
    },
    /// `GET /log/<file_name>?entries=<entries>`
    Entries {
        /// File to read.
        file_name: String,
        /// Number of most recent entries.
        entries: NonZeroUsize,
    },
}

impl RemoteAction {
    /// Returns the kind of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Logs => ActionKind::Logs,
            Self::Log { .. } => ActionKind::Log,
            Self::Search { .. } => ActionKind::Search,
            Self::Entries { .. } => ActionKind::Entries,
        }
    }

    /// Builds the request URL for this action on the peer at `host`.
    ///
    /// Hosts without a scheme are treated as plain `http://` hosts. Any path
    /// already present on the host is kept as a prefix.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidHost`] if `host` is not a valid base URL.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::remote::RemoteAction;
    /// use std::num::NonZeroUsize;
    ///
    /// let action = RemoteAction::Entries {
    ///     file_name: "app.log".to_string(),
    ///     entries: NonZeroUsize::new(10).unwrap(),
    /// };
    /// let url = action.url("peer:8080").unwrap();
    ///
    /// assert_eq!(url.as_str(), "http://peer:8080/log/app.log?entries=10");
    /// ```
    pub fn url(&self, host: &str) -> Result<Url, RemoteError> {
        let base = normalize_host(host);
        let invalid = |reason: String| RemoteError::InvalidHost {
            host: base.clone(),
            reason,
        };

        let mut url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| invalid("cannot be used as a base URL".to_string()))?;
            segments.pop_if_empty();
            match self {
                Self::Logs => {
                    segments.push("logs");
                }
                Self::Log { .. } => {
                    segments.push("log");
                }
                Self::Search { .. } => {
                    segments.push("search");
                }
                Self::Entries { file_name, .. } => {
                    segments.push("log").push(file_name);
                }
            }
        }

        match self {
            Self::Logs => {}
            Self::Log { file_name } => {
                url.query_pairs_mut().append_pair("file", file_name);
            }
            Self::Search { keyword } => {
                url.query_pairs_mut().append_pair("keyword", keyword);
            }
            Self::Entries { entries, .. } => {
                url.query_pairs_mut()
                    .append_pair("entries", &entries.to_string());
            }
        }

        Ok(url)
    }
}

impl TryFrom<&RemoteTarget> for RemoteAction {
    type Error = RemoteError;

    fn try_from(target: &RemoteTarget) -> Result<Self, Self::Error> {
        let kind = ActionKind::parse(&target.action)
            .ok_or_else(|| RemoteError::UnknownAction(target.action.clone()))?;

        let file_name = target.file_name.clone().filter(|f| !f.is_empty());
        let keyword = target.keyword.clone().filter(|k| !k.is_empty());
        let entries = target.entries.as_ref().and_then(EntryCount::positive);

        let action = match kind {
            ActionKind::Logs => Some(Self::Logs),
            ActionKind::Log => file_name.map(|file_name| Self::Log { file_name }),
            ActionKind::Search => keyword.map(|keyword| Self::Search { keyword }),
            ActionKind::Entries => file_name
                .zip(entries)
                .map(|(file_name, entries)| Self::Entries { file_name, entries }),
        };

        action.ok_or(RemoteError::InvalidParameters(kind))
    }
}

/// Prefixes `http://` onto hosts that carry no scheme.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    if host.starts_with("http") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
