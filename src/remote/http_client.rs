use super::*;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Location {
    Http(String),
    Path(PathBuf),
}

impl SnapshotClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            anyhow::bail!("{}: snapshot document not found", label);
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    pub(super) fn resolve(&self, location: &str) -> Location {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            return Location::Http(location.to_string());
        }
        let path = Path::new(location.strip_prefix("file://").unwrap_or(location));
        match &self.base_dir {
            Some(base) if path.is_relative() => Location::Path(base.join(path)),
            _ => Location::Path(path.to_path_buf()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
