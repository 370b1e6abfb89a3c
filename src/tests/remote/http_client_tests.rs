use super::*;

fn client() -> SnapshotClient {
    SnapshotClient::new(Duration::from_secs(1)).expect("build client")
}

#[test]
fn http_locations_are_fetched_over_the_network() {
    assert_eq!(
        client().resolve("https://alice.github.io/links/data.json"),
        Location::Http("https://alice.github.io/links/data.json".to_string())
    );
}

#[test]
fn relative_paths_resolve_against_base_dir() {
    let c = client().with_base_dir("/srv/ws");
    assert_eq!(
        c.resolve("data.json"),
        Location::Path(PathBuf::from("/srv/ws/data.json"))
    );
    assert_eq!(
        c.resolve("file:///tmp/peer.json"),
        Location::Path(PathBuf::from("/tmp/peer.json"))
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let c = client().with_base_dir(dir.path());
    let err = c.fetch("nope.json").expect_err("missing snapshot");
    assert!(format!("{:#}", err).contains("read snapshot"));
}

#[test]
fn local_snapshot_parses_and_ignores_unknown_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("data.json"),
        br#"{"root":[{"type":"folder","name":"reading","children":[]}],"friends":[{"url":"peer.json"}],"extra":1}"#,
    )
    .expect("write snapshot");
    let snap = client()
        .with_base_dir(dir.path())
        .fetch("data.json")
        .expect("fetch");
    assert_eq!(snap.root.len(), 1);
    assert_eq!(snap.friends.len(), 1);
}
