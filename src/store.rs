use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{Command, InFlightBatch, WorkspaceConfig};

const STORE_DIR: &str = ".bookmarks";
const CONFIG_FILE: &str = "config.json";
const QUEUE_FILE: &str = "queue.json";
const INFLIGHT_FILE: &str = "inflight.json";

/// On-disk state of a bookmarks workspace: config plus the durable queue slot
/// and the in-flight batch slot.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn store_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn open(workspace_root: &Path) -> Result<Self> {
        let root = Self::store_dir(workspace_root);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `bookmarks init`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self { root })
    }

    pub fn init(workspace_root: &Path, cfg: &WorkspaceConfig, force: bool) -> Result<Self> {
        let root = Self::store_dir(workspace_root);
        if root.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                root.display()
            ));
        }
        fs::create_dir_all(&root).context("create store dir")?;

        let store = Self { root };
        store.write_config(cfg)?;
        Ok(store)
    }

    pub fn read_config(&self) -> Result<WorkspaceConfig> {
        let bytes = fs::read(self.root.join(CONFIG_FILE)).context("read config.json")?;
        let cfg: WorkspaceConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported workspace config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &WorkspaceConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join(CONFIG_FILE), &bytes).context("write config.json")?;
        Ok(())
    }

    /// Pending commands; an absent slot is an empty queue.
    pub fn read_queue(&self) -> Result<Vec<Command>> {
        let path = self.root.join(QUEUE_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).context("read queue.json")?;
        let commands: Vec<Command> = serde_json::from_slice(&bytes).context("parse queue.json")?;
        Ok(commands)
    }

    pub fn write_queue(&self, commands: &[Command]) -> Result<()> {
        if commands.is_empty() {
            return self.clear_queue();
        }
        let bytes = serde_json::to_vec_pretty(commands).context("serialize queue")?;
        write_atomic(&self.root.join(QUEUE_FILE), &bytes).context("write queue.json")?;
        Ok(())
    }

    pub fn clear_queue(&self) -> Result<()> {
        remove_if_present(&self.root.join(QUEUE_FILE))
    }

    pub fn has_queue(&self) -> bool {
        self.root.join(QUEUE_FILE).exists()
    }

    pub fn read_inflight(&self) -> Result<Option<InFlightBatch>> {
        let path = self.root.join(INFLIGHT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).context("read inflight.json")?;
        let batch: InFlightBatch =
            serde_json::from_slice(&bytes).context("parse inflight.json")?;
        if batch.version != 1 {
            anyhow::bail!("unsupported in-flight batch version {}", batch.version);
        }
        Ok(Some(batch))
    }

    pub fn write_inflight(&self, batch: &InFlightBatch) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(batch).context("serialize in-flight batch")?;
        write_atomic(&self.root.join(INFLIGHT_FILE), &bytes).context("write inflight.json")?;
        Ok(())
    }

    pub fn clear_inflight(&self) -> Result<()> {
        remove_if_present(&self.root.join(INFLIGHT_FILE))
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
    }
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
