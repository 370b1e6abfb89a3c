use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::dispatch::{FixedRepo, HostingLocation, RepoResolver, SyncDispatcher};
use crate::model::WorkspaceConfig;
use crate::queue::FileQueue;
use crate::remote::SnapshotClient;
use crate::session::Session;
use crate::store::LocalStore;

/// A directory holding a `.bookmarks` store.
#[derive(Clone, Debug)]
pub struct Workspace {
    pub root: PathBuf,
    pub store: LocalStore,
}

impl Workspace {
    pub fn init(root: &Path, cfg: &WorkspaceConfig, force: bool) -> Result<Self> {
        let store = LocalStore::init(root, cfg, force)?;
        Ok(Self {
            root: root.to_path_buf(),
            store,
        })
    }

    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if LocalStore::store_dir(dir).is_dir() {
                let store = LocalStore::open(dir)?;
                return Ok(Self {
                    root: dir.to_path_buf(),
                    store,
                });
            }
        }
        Err(anyhow!(
            "No .bookmarks directory found (run `bookmarks init`)"
        ))
    }

    pub fn config(&self) -> Result<WorkspaceConfig> {
        self.store.read_config()
    }

    /// Client for snapshot documents; relative locations resolve against the
    /// workspace root.
    pub fn snapshot_client(&self, cfg: &WorkspaceConfig) -> Result<SnapshotClient> {
        let client = SnapshotClient::new(Duration::from_secs(cfg.fetch_timeout_secs))?;
        Ok(client.with_base_dir(&self.root))
    }

    /// Fetches the snapshot and opens a session over the durable queue, with
    /// any unacknowledged batch replayed ahead of it. A failed fetch is logged
    /// and yields an empty tree.
    pub fn open_session(&self, cfg: &WorkspaceConfig) -> Result<Session<FileQueue>> {
        let client = self.snapshot_client(cfg)?;
        let queue = FileQueue::open(self.store.clone())?;
        let in_flight = self
            .store
            .read_inflight()?
            .map(|batch| batch.commands)
            .unwrap_or_default();
        let fetched = client.fetch(&cfg.snapshot);
        Ok(Session::open(cfg.user.clone(), queue, in_flight, fetched))
    }

    pub fn dispatcher(
        &self,
        cfg: &WorkspaceConfig,
    ) -> Result<SyncDispatcher<Box<dyn RepoResolver>>> {
        Ok(SyncDispatcher::new(cfg.dispatch_mode, repo_resolver(cfg)?))
    }
}

/// Explicit `repo` wins, then the hosting address, then the placeholder path.
pub fn repo_resolver(cfg: &WorkspaceConfig) -> Result<Box<dyn RepoResolver>> {
    if let Some(repo) = cfg.repo.as_deref().filter(|r| !r.trim().is_empty()) {
        return Ok(Box::new(FixedRepo(repo.to_string())));
    }
    let hosting = match cfg.hosting.as_deref() {
        Some(address) => HostingLocation::parse(address)?,
        None => HostingLocation {
            hostname: "localhost".to_string(),
            pathname: "/".to_string(),
        },
    };
    Ok(Box::new(hosting))
}
