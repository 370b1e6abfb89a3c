//! Merge Quorum Gate.
//!
//! A file sitting in the shared folder may only be merged once every party
//! (the local user plus each configured friend) has reviewed it. The count is
//! taken from the locally visible review list only; peers are not re-fetched,
//! so a stale list can admit or block a merge that a live check would not.

use std::fmt;

use crate::tree::TreeStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuorumCheck {
    /// Distinct reviewers on the file.
    pub present: usize,
    /// Local user plus every friend.
    pub required: usize,
}

impl QuorumCheck {
    pub fn is_met(&self) -> bool {
        self.present >= self.required
    }
}

impl fmt::Display for QuorumCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.present, self.required)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeGate {
    /// Not in the shared folder; merges unconditionally.
    Open,
    Met(QuorumCheck),
    Missing(QuorumCheck),
}

impl MergeGate {
    pub fn allows_merge(&self) -> bool {
        !matches!(self, MergeGate::Missing(_))
    }
}

pub fn required_reviewers(friend_count: usize) -> usize {
    1 + friend_count
}

/// Gate decision for merging the first file with `url`; `None` if no such file.
pub fn check_merge(tree: &TreeStore, url: &str, friend_count: usize) -> Option<MergeGate> {
    let file = tree.find_file(url)?;
    if !tree.is_shared(url) {
        return Some(MergeGate::Open);
    }
    let check = QuorumCheck {
        present: file.reviewers().len(),
        required: required_reviewers(friend_count),
    };
    if check.is_met() {
        Some(MergeGate::Met(check))
    } else {
        Some(MergeGate::Missing(check))
    }
}

#[cfg(test)]
#[path = "tests/quorum_tests.rs"]
mod tests;
