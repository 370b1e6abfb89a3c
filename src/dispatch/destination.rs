//! Destination addressing for the outbound change-request.

use super::*;

pub const ISSUE_HOST: &str = "https://github.com";
pub const ISSUE_TITLE: &str = "batch:update";
pub const PLACEHOLDER_REPO: &str = "YOUR_USERNAME/YOUR_REPO";
const DEFAULT_REPOSITORY: &str = "bookmarks";

/// Supplies the `account/repository` path a batch is addressed to.
pub trait RepoResolver {
    fn repo_path(&self) -> String;
}

impl<R: RepoResolver + ?Sized> RepoResolver for Box<R> {
    fn repo_path(&self) -> String {
        (**self).repo_path()
    }
}

/// An explicitly configured `account/repository`.
#[derive(Clone, Debug)]
pub struct FixedRepo(pub String);

impl RepoResolver for FixedRepo {
    fn repo_path(&self) -> String {
        self.0.trim_matches('/').to_string()
    }
}

/// Derives the repository from where the bookmarks page is hosted:
/// `alice.github.io/links/` addresses `alice/links`.
#[derive(Clone, Debug)]
pub struct HostingLocation {
    pub hostname: String,
    pub pathname: String,
}

impl HostingLocation {
    pub fn parse(address: &str) -> Result<Self> {
        let url = reqwest::Url::parse(address)
            .with_context(|| format!("parse hosting address {}", address))?;
        Ok(Self {
            hostname: url.host_str().unwrap_or_default().to_string(),
            pathname: url.path().to_string(),
        })
    }
}

impl RepoResolver for HostingLocation {
    fn repo_path(&self) -> String {
        let labels = self.hostname.split('.').collect::<Vec<_>>();
        if labels.len() < 2 {
            return PLACEHOLDER_REPO.to_string();
        }
        let repo = self.pathname.strip_prefix('/').unwrap_or(&self.pathname);
        let repo = repo.strip_suffix('/').unwrap_or(repo);
        let repo = if repo.is_empty() {
            DEFAULT_REPOSITORY
        } else {
            repo
        };
        format!("{}/{}", labels[0], repo)
    }
}

/// Pre-filled issue-creation address carrying `request` as its body.
pub fn issue_url(repo_path: &str, request: &ChangeRequest) -> Result<String> {
    let body = serde_json::to_string(request).context("serialize change request")?;
    Ok(format!(
        "{}/{}/issues/new?title={}&body={}",
        ISSUE_HOST,
        repo_path,
        ISSUE_TITLE,
        urlencoding::encode(&body)
    ))
}

#[cfg(test)]
#[path = "../tests/dispatch/destination_tests.rs"]
mod tests;
