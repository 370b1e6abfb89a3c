use serde::{Deserialize, Serialize};

use super::node::Node;

/// A fetched, immutable copy of a bookmark tree (local or peer).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub root: Vec<Node>,

    /// Only meaningful for the local snapshot; ignored on peer documents.
    #[serde(default)]
    pub friends: Vec<PeerRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerRef {
    pub url: String,
}
