mod command;
mod config;
mod node;
mod snapshot;

pub use self::command::{ChangeRequest, Command, InFlightBatch, compute_batch_id};
pub use self::config::{DispatchMode, WorkspaceConfig};
pub use self::node::{File, Folder, Node, Review};
pub use self::snapshot::{PeerRef, Snapshot};

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
