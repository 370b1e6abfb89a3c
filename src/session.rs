//! Application state for one session: the local tree, the injected command
//! log, the configured friends and their mounts.
//!
//! Every mutating [`Action`] either changes the tree and appends exactly one
//! command in the same call, or changes nothing.

use std::fmt;

use anyhow::Result;

use crate::federation::{Mount, mount_peers};
use crate::model::{Command, File, PeerRef, Snapshot};
use crate::queue::CommandLog;
use crate::quorum::{self, MergeGate, QuorumCheck};
use crate::remote::SnapshotSource;
use crate::tree::{TreeError, TreeStore};

/// Where a located bookmark lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Local,
    Peer(String),
}

#[derive(Clone, Debug)]
pub struct Located<'a> {
    pub origin: Origin,
    pub file: &'a File,
}

impl Located<'_> {
    /// Only bookmarks owned by the local tree accept edits.
    pub fn is_editable(&self) -> bool {
        matches!(self.origin, Origin::Local)
    }
}

/// A user intent handed in by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Add {
        folder: String,
        url: String,
        title: Option<String>,
    },
    Review {
        url: String,
        text: String,
    },
    Merge {
        url: String,
    },
    Move {
        url: String,
        target: String,
    },
    Delete {
        url: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    QuorumNotMet(QuorumCheck),
    ReadOnly(String),
    EmptyUrl,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::QuorumNotMet(check) => {
                write!(f, "cannot merge yet: reviews {}, waiting for others", check)
            }
            Rejection::ReadOnly(url) => {
                write!(f, "{} belongs to a mounted peer and is read-only", url)
            }
            Rejection::EmptyUrl => f.write_str("a bookmark needs a url"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Tree mutated and one command queued; `pending` is the new queue length.
    Applied { pending: usize },
    Rejected(Rejection),
    NotFound(TreeError),
}

pub struct Session<Q> {
    user: String,
    tree: TreeStore,
    friends: Vec<PeerRef>,
    mounts: Vec<Mount>,
    /// Dispatched but unacknowledged commands, replayed ahead of the queue.
    in_flight: Vec<Command>,
    queue: Q,
}

impl<Q: CommandLog> Session<Q> {
    /// Empty tree, nothing mounted.
    pub fn new(user: impl Into<String>, queue: Q) -> Self {
        Self {
            user: user.into(),
            tree: TreeStore::new(),
            friends: Vec::new(),
            mounts: Vec::new(),
            in_flight: Vec::new(),
            queue,
        }
    }

    /// Starts a session from a fetched snapshot. A failed fetch leaves the
    /// tree empty. `in_flight` holds commands already dispatched but not yet
    /// acknowledged; they and the pending queue are replayed onto the tree so
    /// it shows this client's own unconfirmed edits.
    pub fn open(
        user: impl Into<String>,
        queue: Q,
        in_flight: Vec<Command>,
        fetched: Result<Snapshot>,
    ) -> Self {
        let mut session = Self::new(user, queue);
        session.in_flight = in_flight;
        session.load(fetched);
        session
    }

    /// Replaces the tree with `fetched` and replays unconfirmed commands onto
    /// it. On failure keeps the current tree.
    pub fn load(&mut self, fetched: Result<Snapshot>) -> bool {
        match self.tree.load_fetched(fetched) {
            Some(friends) => {
                self.friends = friends;
                self.mounts.clear();
                self.replay_unconfirmed();
                true
            }
            None => false,
        }
    }

    /// Re-applies in-flight then pending commands without queueing them
    /// again. Commands that no longer fit the snapshot are skipped.
    fn replay_unconfirmed(&mut self) -> usize {
        let mut applied = 0;
        for command in self.in_flight.iter().chain(self.queue.commands()) {
            match self.tree.apply(command) {
                Ok(()) => applied += 1,
                Err(err) => tracing::warn!(
                    kind = command.kind(),
                    "skipping pending command on replay: {}",
                    err
                ),
            }
        }
        applied
    }

    /// Drops every mount and fetches all friends again.
    pub fn remount<S>(&mut self, source: &S) -> &[Mount]
    where
        S: SnapshotSource + ?Sized,
    {
        self.mounts = mount_peers(source, &self.friends);
        &self.mounts
    }

    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn tree(&self) -> &TreeStore {
        &self.tree
    }

    pub fn friends(&self) -> &[PeerRef] {
        &self.friends
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn into_queue(self) -> Q {
        self.queue
    }

    /// Pending-change counter.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Finds a bookmark in the local tree first, then in each mount.
    pub fn locate(&self, url: &str) -> Option<Located<'_>> {
        if let Some(file) = self.tree.find_file(url) {
            return Some(Located {
                origin: Origin::Local,
                file,
            });
        }
        self.mounts.iter().find_map(|mount| {
            mount.find_file(url).map(|file| Located {
                origin: Origin::Peer(mount.peer.url.clone()),
                file,
            })
        })
    }

    pub fn is_local(&self, url: &str) -> bool {
        self.tree.contains(url)
    }

    pub fn merge_gate(&self, url: &str) -> Option<MergeGate> {
        quorum::check_merge(&self.tree, url, self.friends.len())
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        match action {
            Action::Add { folder, url, title } => {
                let url = url.trim();
                if url.is_empty() {
                    return Ok(Outcome::Rejected(Rejection::EmptyUrl));
                }
                let payload = File::link(url, title);
                self.commit(Command::Add { folder, payload })
            }
            Action::Review { url, text } => {
                if let Some(outcome) = self.read_only(&url) {
                    return Ok(outcome);
                }
                let user = self.user.clone();
                self.commit(Command::Review { url, user, text })
            }
            Action::Merge { url } => {
                if let Some(outcome) = self.read_only(&url) {
                    return Ok(outcome);
                }
                match self.merge_gate(&url) {
                    None => Ok(Outcome::NotFound(TreeError::FileNotFound(url))),
                    Some(MergeGate::Missing(check)) => {
                        tracing::info!(url = %url, quorum = %check, "merge blocked on reviews");
                        Ok(Outcome::Rejected(Rejection::QuorumNotMet(check)))
                    }
                    Some(MergeGate::Open | MergeGate::Met(_)) => {
                        self.commit(Command::Merge { url })
                    }
                }
            }
            Action::Move { url, target } => {
                if let Some(outcome) = self.read_only(&url) {
                    return Ok(outcome);
                }
                self.commit(Command::Move { url, target })
            }
            Action::Delete { url } => {
                if let Some(outcome) = self.read_only(&url) {
                    return Ok(outcome);
                }
                self.commit(Command::Delete { url })
            }
        }
    }

    fn read_only(&self, url: &str) -> Option<Outcome> {
        match self.locate(url) {
            Some(located) if !located.is_editable() => {
                Some(Outcome::Rejected(Rejection::ReadOnly(url.to_string())))
            }
            _ => None,
        }
    }

    /// Applies `command` to the tree and appends it to the log as one step.
    fn commit(&mut self, command: Command) -> Result<Outcome> {
        let before = self.tree.clone();
        if let Err(err) = self.tree.apply(&command) {
            return Ok(Outcome::NotFound(err));
        }
        let kind = command.kind();
        match self.queue.enqueue(command) {
            Ok(pending) => {
                tracing::debug!(kind, pending, "queued command");
                Ok(Outcome::Applied { pending })
            }
            Err(err) => {
                self.tree = before;
                Err(err.context(format!("queue {} command", kind)))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
