#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::sync::oneshot;

type Documents = Arc<BTreeMap<String, String>>;

/// Serves snapshot documents over HTTP for the lifetime of the guard.
///
/// Every document is served at `/<name>`. `/broken.json` answers 500 and
/// `/slow.json` stalls for two seconds before answering.
pub struct SnapshotServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<Result<()>>>,
}

impl SnapshotServer {
    pub fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

impl Drop for SnapshotServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn spawn_snapshot_server(docs: &[(&str, serde_json::Value)]) -> Result<SnapshotServer> {
    let docs: Documents = Arc::new(
        docs.iter()
            .map(|(name, doc)| (format!("/{}", name), doc.to_string()))
            .collect(),
    );
    let (addr_tx, addr_rx) = mpsc::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = thread::spawn(move || -> Result<()> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("build server runtime")?;
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .context("bind snapshot server")?;
            let addr = listener.local_addr().context("read local addr")?;
            let _ = addr_tx.send(addr);

            let app = Router::new()
                .route("/broken.json", get(broken))
                .route("/slow.json", get(slow))
                .fallback(serve_document)
                .with_state(docs);
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .context("serve snapshots")
        })
    });

    let addr = addr_rx
        .recv_timeout(Duration::from_secs(5))
        .context("snapshot server did not start")?;

    Ok(SnapshotServer {
        base_url: format!("http://{}", addr),
        shutdown: Some(shutdown_tx),
        handle: Some(handle),
    })
}

async fn serve_document(State(docs): State<Documents>, uri: Uri) -> Response {
    match docs.get(uri.path()) {
        Some(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(2)).await;
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"root":[],"friends":[]}"#,
    )
        .into_response()
}

/// An address nothing listens on.
pub fn unreachable_url() -> String {
    "http://127.0.0.1:9/data.json".to_string()
}

pub fn folder(name: &str, children: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({ "type": "folder", "name": name, "children": children })
}

pub fn link(title: &str, url: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "file",
        "name": format!("{}.lnk", title.to_lowercase()),
        "url": url,
        "title": title,
        "reviews": [],
    })
}

pub fn snapshot(root: Vec<serde_json::Value>, friends: &[String]) -> serde_json::Value {
    let friends = friends
        .iter()
        .map(|url| serde_json::json!({ "url": url }))
        .collect::<Vec<_>>();
    serde_json::json!({ "root": root, "friends": friends })
}

pub fn write_snapshot(dir: &Path, name: &str, doc: &serde_json::Value) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(doc).context("serialize snapshot")?;
    std::fs::write(dir.join(name), bytes).with_context(|| format!("write {}", name))
}

pub fn run_bookmarks(cwd: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_bookmarks"))
        .args(args)
        .current_dir(cwd)
        .env_remove("BOOKMARKS_LOG")
        .output()
        .with_context(|| format!("run bookmarks {:?}", args))
}

pub fn bookmarks_ok(cwd: &Path, args: &[&str]) -> Result<String> {
    let out = run_bookmarks(cwd, args)?;
    if !out.status.success() {
        anyhow::bail!(
            "bookmarks {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}
