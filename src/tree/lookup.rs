use std::collections::BTreeMap;

use super::*;

/// First file with `url`, depth-first over `nodes`.
pub(crate) fn find_in<'a>(nodes: &'a [Node], url: &str) -> Option<&'a File> {
    for node in nodes {
        match node {
            Node::File(file) if file.url == url => return Some(file),
            Node::File(_) => {}
            Node::Folder(folder) => {
                if let Some(file) = find_in(&folder.children, url) {
                    return Some(file);
                }
            }
        }
    }
    None
}

pub(super) fn find_in_mut<'a>(nodes: &'a mut [Node], url: &str) -> Option<&'a mut File> {
    for node in nodes {
        match node {
            Node::File(file) if file.url == url => return Some(file),
            Node::File(_) => {}
            Node::Folder(folder) => {
                if let Some(file) = find_in_mut(&mut folder.children, url) {
                    return Some(file);
                }
            }
        }
    }
    None
}

/// Index path from `nodes` down to the first file with `url`.
fn path_to(nodes: &[Node], url: &str, path: &mut Vec<usize>) -> bool {
    for (idx, node) in nodes.iter().enumerate() {
        path.push(idx);
        let hit = match node {
            Node::File(file) => file.url == url,
            Node::Folder(folder) => path_to(&folder.children, url, path),
        };
        if hit {
            return true;
        }
        path.pop();
    }
    false
}

fn walk_files<'a>(nodes: &'a [Node], out: &mut Vec<&'a File>) {
    for node in nodes {
        match node {
            Node::File(file) => out.push(file),
            Node::Folder(folder) => walk_files(&folder.children, out),
        }
    }
}

fn count_nodes(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::File(_) => 1,
            Node::Folder(folder) => 1 + count_nodes(&folder.children),
        })
        .sum()
}

impl TreeStore {
    pub fn find_file(&self, url: &str) -> Option<&File> {
        find_in(&self.root, url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.find_file(url).is_some()
    }

    /// First top-level folder named `name`.
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.root
            .iter()
            .filter_map(Node::as_folder)
            .find(|f| f.name == name)
    }

    pub fn has_folder(&self, name: &str) -> bool {
        self.folder(name).is_some()
    }

    /// Name of the folder directly holding the first file with `url`.
    /// `None` when the file is missing or sits at the top level.
    pub fn parent_folder_name(&self, url: &str) -> Option<&str> {
        let mut path = Vec::new();
        if !path_to(&self.root, url, &mut path) {
            return None;
        }
        path.pop();
        let mut nodes = &self.root;
        let mut parent: Option<&Folder> = None;
        for idx in path {
            let folder = nodes.get(idx)?.as_folder()?;
            nodes = &folder.children;
            parent = Some(folder);
        }
        parent.map(|f| f.name.as_str())
    }

    /// True when the file sits directly inside the first top-level folder
    /// named `shared`.
    pub fn is_shared(&self, url: &str) -> bool {
        let Some(shared) = self
            .root
            .iter()
            .position(|node| matches!(node, Node::Folder(f) if f.name == SHARED_FOLDER))
        else {
            return false;
        };
        let mut path = Vec::new();
        path_to(&self.root, url, &mut path) && path.len() == 2 && path[0] == shared
    }

    /// Every file in display order.
    pub fn files(&self) -> Vec<&File> {
        let mut out = Vec::new();
        walk_files(&self.root, &mut out);
        out
    }

    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    /// Folders and files, at every depth.
    pub fn node_count(&self) -> usize {
        count_nodes(&self.root)
    }

    /// Urls held by more than one file, with their occurrence counts.
    pub fn duplicate_urls(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for file in self.files() {
            *counts.entry(file.url.clone()).or_default() += 1;
        }
        counts.retain(|_, n| *n > 1);
        counts
    }
}
