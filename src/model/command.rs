use serde::{Deserialize, Serialize};

use super::node::{File, Node};

/// A queued intent to mutate the remote copy once dispatched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Add {
        folder: String,
        #[serde(with = "file_as_node")]
        payload: File,
    },
    Review { url: String, user: String, text: String },
    Merge { url: String },
    Move { url: String, target: String },
    Delete { url: String },
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Review { .. } => "review",
            Command::Merge { .. } => "merge",
            Command::Move { .. } => "move",
            Command::Delete { .. } => "delete",
        }
    }

    /// The bookmark url this command targets.
    pub fn url(&self) -> &str {
        match self {
            Command::Add { payload, .. } => &payload.url,
            Command::Review { url, .. }
            | Command::Merge { url }
            | Command::Move { url, .. }
            | Command::Delete { url } => url,
        }
    }
}

/// Add payloads carry the node tag (`"type": "file"`) so the remote side can
/// insert them as-is.
mod file_as_node {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{File, Node};

    pub fn serialize<S: Serializer>(file: &File, serializer: S) -> Result<S::Ok, S::Error> {
        Node::File(file.clone()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<File, D::Error> {
        match Node::deserialize(deserializer)? {
            Node::File(file) => Ok(file),
            Node::Folder(folder) => Err(D::Error::custom(format!(
                "add payload must be a file, got folder {:?}",
                folder.name
            ))),
        }
    }
}

/// Outbound batch body: `{ "commands": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub commands: Vec<Command>,
}

/// A dispatched batch kept until the remote side confirms it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InFlightBatch {
    pub version: u32,
    pub id: String,
    pub created_at: String,
    pub commands: Vec<Command>,
}

pub fn compute_batch_id(created_at: &str, request_json: &[u8]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(created_at.as_bytes());
    hasher.update(b"\n");
    hasher.update(request_json);
    hasher.finalize().to_hex().to_string()
}
