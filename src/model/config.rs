use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub version: u32,

    /// Identity recorded on reviews.
    pub user: String,

    /// Location of the local snapshot document (http(s) url or path).
    pub snapshot: String,

    /// `account/repository` the change-request is addressed to. When unset the
    /// path is derived from `hosting` or falls back to a placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Hosting address the page would be served from, e.g.
    /// `https://alice.github.io/links/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosting: Option<String>,

    #[serde(default)]
    pub dispatch_mode: DispatchMode,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl WorkspaceConfig {
    pub fn new(user: impl Into<String>, snapshot: impl Into<String>) -> Self {
        Self {
            version: 1,
            user: user.into(),
            snapshot: snapshot.into(),
            repo: None,
            hosting: None,
            dispatch_mode: DispatchMode::default(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Clear the queue as soon as the hand-off is initiated.
    #[default]
    Optimistic,
    /// Keep the batch in flight until it is acknowledged.
    Acknowledged,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Optimistic => f.write_str("optimistic"),
            DispatchMode::Acknowledged => f.write_str("acknowledged"),
        }
    }
}

impl FromStr for DispatchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimistic" => Ok(DispatchMode::Optimistic),
            "acknowledged" => Ok(DispatchMode::Acknowledged),
            other => anyhow::bail!(
                "unknown dispatch mode {:?} (expected optimistic or acknowledged)",
                other
            ),
        }
    }
}
