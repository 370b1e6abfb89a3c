use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::Snapshot;

mod fetch;
mod http_client;

/// Anything that can produce a snapshot document for a location.
pub trait SnapshotSource: Sync {
    fn fetch_snapshot(&self, location: &str) -> Result<Snapshot>;
}

/// Fetches snapshot documents over http(s), or from disk for plain paths and
/// `file://` locations. Relative paths resolve against `base_dir`.
pub struct SnapshotClient {
    client: reqwest::blocking::Client,
    base_dir: Option<PathBuf>,
}

impl SnapshotClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("bookmarks")
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            base_dir: None,
        })
    }

    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl SnapshotSource for SnapshotClient {
    fn fetch_snapshot(&self, location: &str) -> Result<Snapshot> {
        self.fetch(location)
    }
}
