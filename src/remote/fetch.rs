//! Snapshot document retrieval. Failures are returned, never retried here.

use super::http_client::Location;
use super::*;

impl SnapshotClient {
    pub fn fetch(&self, location: &str) -> Result<Snapshot> {
        let bytes = match self.resolve(location) {
            Location::Http(url) => {
                let resp = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .with_context(|| format!("fetch {}", url))?;
                self.ensure_ok(resp, &format!("fetch {}", url))?
                    .bytes()
                    .context("read snapshot body")?
                    .to_vec()
            }
            Location::Path(path) => std::fs::read(&path)
                .with_context(|| format!("read snapshot {}", path.display()))?,
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse snapshot {}", location))?;
        Ok(snapshot)
    }
}
