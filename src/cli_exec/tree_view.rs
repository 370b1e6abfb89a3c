use std::fmt::Write as _;

use bookmarks::federation::{MOUNT_LABEL, Mount, MountState};
use bookmarks::model::Node;

/// Plain-text tree: the local bookmarks first, then every peer under the
/// mount container.
pub(super) fn render(root: &[Node], mounts: &[Mount]) -> String {
    let mut out = String::new();
    if root.is_empty() {
        out.push_str("(empty)\n");
    }
    render_nodes(&mut out, root, 0);

    if !mounts.is_empty() {
        let _ = writeln!(out, "{}/", MOUNT_LABEL);
        for mount in mounts {
            match &mount.state {
                MountState::Mounted(nodes) => {
                    let _ = writeln!(out, "  {}/", mount.peer.url);
                    render_nodes(&mut out, nodes, 2);
                }
                MountState::Failed(cause) => {
                    let _ = writeln!(
                        out,
                        "  {} [connection failed: {}]",
                        mount.peer.url, cause
                    );
                }
            }
        }
    }
    out
}

fn render_nodes(out: &mut String, nodes: &[Node], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        match node {
            Node::Folder(folder) => {
                let _ = writeln!(out, "{}{}/", indent, folder.name);
                render_nodes(out, &folder.children, depth + 1);
            }
            Node::File(file) => {
                let reviews = match file.reviews.len() {
                    0 => String::new(),
                    n => format!(" [{} reviews]", n),
                };
                let _ = writeln!(out, "{}{}  {}{}", indent, file.title, file.url, reviews);
            }
        }
    }
}

pub(super) fn tree_json(root: &[Node], mounts: &[Mount]) -> serde_json::Value {
    let mounts = mounts
        .iter()
        .map(|mount| match &mount.state {
            MountState::Mounted(nodes) => serde_json::json!({
                "peer": mount.peer.url,
                "root": nodes,
            }),
            MountState::Failed(cause) => serde_json::json!({
                "peer": mount.peer.url,
                "error": cause,
            }),
        })
        .collect::<Vec<_>>();
    serde_json::json!({
        "root": root,
        "mounts": mounts,
    })
}
