//! Federation Mounter: read-only attachment of peers' trees.
//!
//! Each peer is fetched on its own thread. A failure (error or panic) stays
//! inside that peer's [`Mount`]; it never reaches the local tree or another
//! peer. Mounts are rebuilt from scratch on every call.

use std::thread;

use crate::model::{File, Node, PeerRef};
use crate::remote::SnapshotSource;
use crate::tree::find_in;

/// Label of the container peers are rendered under.
pub const MOUNT_LABEL: &str = "mnt (friends)";

#[derive(Clone, Debug, PartialEq)]
pub struct Mount {
    pub peer: PeerRef,
    pub state: MountState,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MountState {
    Mounted(Vec<Node>),
    /// Scoped "connection failed" indicator with the cause.
    Failed(String),
}

impl Mount {
    pub fn nodes(&self) -> &[Node] {
        match &self.state {
            MountState::Mounted(nodes) => nodes,
            MountState::Failed(_) => &[],
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, MountState::Mounted(_))
    }

    pub fn find_file(&self, url: &str) -> Option<&File> {
        find_in(self.nodes(), url)
    }
}

/// Fetches every peer concurrently; returns one mount per peer, in the
/// configured order.
pub fn mount_peers<S>(source: &S, friends: &[PeerRef]) -> Vec<Mount>
where
    S: SnapshotSource + ?Sized,
{
    thread::scope(|scope| {
        let handles = friends
            .iter()
            .map(|peer| {
                let handle = scope.spawn(move || source.fetch_snapshot(&peer.url));
                (peer, handle)
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|(peer, handle)| {
                let state = match handle.join() {
                    Ok(Ok(snapshot)) => {
                        tracing::debug!(peer = %peer.url, nodes = snapshot.root.len(), "mounted peer");
                        MountState::Mounted(snapshot.root)
                    }
                    Ok(Err(err)) => {
                        tracing::warn!(peer = %peer.url, "peer connection failed: {:#}", err);
                        MountState::Failed(format!("{:#}", err))
                    }
                    Err(_) => {
                        tracing::warn!(peer = %peer.url, "peer fetch panicked");
                        MountState::Failed("peer fetch panicked".to_string())
                    }
                };
                Mount {
                    peer: peer.clone(),
                    state,
                }
            })
            .collect()
    })
}

#[cfg(test)]
#[path = "tests/federation_tests.rs"]
mod tests;
