use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One entry of a bookmark tree, tagged on the wire as `"type": "folder" | "file"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Folder(Folder),
    File(File),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Folder(folder) => &folder.name,
            Node::File(file) => &file.name,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::File(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,

    /// Display order; preserved across every mutation.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub reviews: Vec<Review>,

    /// Opaque metadata carried through untouched.
    #[serde(default)]
    pub points: Vec<serde_json::Value>,
}

impl File {
    /// Builds a fresh bookmark the way the add form does: the title falls back
    /// to the url and the file name is the slugged title with a `.lnk` suffix.
    pub fn link(url: impl Into<String>, title: Option<String>) -> Self {
        let url = url.into();
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.clone());
        Self {
            name: link_name(&title),
            url,
            title,
            reviews: Vec::new(),
            points: Vec::new(),
        }
    }

    pub fn review_by(&self, user: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.user == user)
    }

    /// Distinct reviewer identities; duplicate reviews by one user count once.
    pub fn reviewers(&self) -> BTreeSet<&str> {
        self.reviews.iter().map(|r| r.user.as_str()).collect()
    }

    /// Replaces the review left by `review.user`, or appends it.
    pub fn upsert_review(&mut self, review: Review) {
        match self.reviews.iter_mut().find(|r| r.user == review.user) {
            Some(existing) => existing.text = review.text,
            None => self.reviews.push(review),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub text: String,
}

fn link_name(title: &str) -> String {
    let slug = title.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}.lnk", slug.to_lowercase())
}
