use super::lookup::find_in_mut;
use super::*;

fn take_from(nodes: &mut Vec<Node>, url: &str) -> Option<File> {
    for idx in 0..nodes.len() {
        let hit = matches!(&nodes[idx], Node::File(file) if file.url == url);
        if hit {
            return match nodes.remove(idx) {
                Node::File(file) => Some(file),
                Node::Folder(_) => None,
            };
        }
        if let Node::Folder(folder) = &mut nodes[idx]
            && let Some(file) = take_from(&mut folder.children, url)
        {
            return Some(file);
        }
    }
    None
}

impl TreeStore {
    fn folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.root.iter_mut().find_map(|node| match node {
            Node::Folder(folder) if folder.name == name => Some(folder),
            _ => None,
        })
    }

    /// Appends `file` to the first top-level folder named `folder_name`.
    pub fn insert(&mut self, folder_name: &str, file: File) -> Result<(), TreeError> {
        let folder = self
            .folder_mut(folder_name)
            .ok_or_else(|| TreeError::FolderNotFound(folder_name.to_string()))?;
        folder.children.push(Node::File(file));
        Ok(())
    }

    /// Detaches the first file with `url`, at any depth.
    pub fn take_file(&mut self, url: &str) -> Option<File> {
        take_from(&mut self.root, url)
    }

    /// Deletes the first file with `url`; reports whether anything was removed.
    pub fn remove(&mut self, url: &str) -> bool {
        self.take_file(url).is_some()
    }

    /// Re-parents the first file with `url` under the top-level folder `target`.
    /// The target is checked first so a miss never drops the file.
    pub fn move_file(&mut self, url: &str, target: &str) -> Result<(), TreeError> {
        if !self.has_folder(target) {
            return Err(TreeError::FolderNotFound(target.to_string()));
        }
        let file = self
            .take_file(url)
            .ok_or_else(|| TreeError::FileNotFound(url.to_string()))?;
        self.insert(target, file)
    }

    pub fn upsert_review(&mut self, url: &str, review: Review) -> Result<(), TreeError> {
        let file = find_in_mut(&mut self.root, url)
            .ok_or_else(|| TreeError::FileNotFound(url.to_string()))?;
        file.upsert_review(review);
        Ok(())
    }

    /// Promotes a file into the archive folder, creating it at the end of the
    /// top level when the snapshot has none.
    pub fn archive(&mut self, url: &str) -> Result<(), TreeError> {
        let file = self
            .take_file(url)
            .ok_or_else(|| TreeError::FileNotFound(url.to_string()))?;
        if !self.has_folder(ARCHIVE_FOLDER) {
            self.root.push(Node::Folder(Folder::new(ARCHIVE_FOLDER)));
        }
        self.insert(ARCHIVE_FOLDER, file)
    }

    /// Applies the in-memory effect of one queued command.
    pub fn apply(&mut self, command: &Command) -> Result<(), TreeError> {
        match command {
            Command::Add { folder, payload } => self.insert(folder, payload.clone()),
            Command::Review { url, user, text } => self.upsert_review(
                url,
                Review {
                    user: user.clone(),
                    text: text.clone(),
                },
            ),
            Command::Merge { url } => self.archive(url),
            Command::Move { url, target } => self.move_file(url, target),
            Command::Delete { url } => {
                if self.remove(url) {
                    Ok(())
                } else {
                    Err(TreeError::FileNotFound(url.clone()))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/tree/edit_tests.rs"]
mod tests;
