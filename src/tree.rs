//! Tree Store: the only mutable copy of the local bookmark tree.
//!
//! Lookups are depth-first, pre-order, in display order. Urls are not
//! guaranteed unique, so every url-keyed operation acts on the first match.

use std::fmt;

use anyhow::Result;

use crate::model::{Command, File, Folder, Node, PeerRef, Review, Snapshot};

mod edit;
mod lookup;

pub(crate) use self::lookup::find_in;

/// Top-level folder whose files need a reviewer quorum before merging.
pub const SHARED_FOLDER: &str = "shared";

/// Top-level folder merged files are promoted into.
pub const ARCHIVE_FOLDER: &str = "archive";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeStore {
    root: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    FolderNotFound(String),
    FileNotFound(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::FolderNotFound(name) => write!(f, "folder not found: {}", name),
            TreeError::FileNotFound(url) => write!(f, "bookmark not found: {}", url),
        }
    }
}

impl std::error::Error for TreeError {}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(root: Vec<Node>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &[Node] {
        &self.root
    }

    /// Replaces the whole tree with a freshly fetched snapshot and hands back
    /// its friend list.
    pub fn load(&mut self, snapshot: Snapshot) -> Vec<PeerRef> {
        self.root = snapshot.root;
        snapshot.friends
    }

    /// Like [`TreeStore::load`], but a failed fetch only logs and leaves the
    /// previous tree in place.
    pub fn load_fetched(&mut self, fetched: Result<Snapshot>) -> Option<Vec<PeerRef>> {
        match fetched {
            Ok(snapshot) => {
                let friends = self.load(snapshot);
                tracing::info!(
                    files = self.file_count(),
                    friends = friends.len(),
                    "loaded bookmark snapshot"
                );
                Some(friends)
            }
            Err(err) => {
                tracing::warn!("error loading bookmark snapshot: {:#}", err);
                None
            }
        }
    }
}
