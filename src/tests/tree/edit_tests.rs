use super::*;

fn tree(value: serde_json::Value) -> TreeStore {
    let snapshot: Snapshot = serde_json::from_value(value).expect("parse snapshot");
    let mut store = TreeStore::new();
    store.load(snapshot);
    store
}

fn link(name: &str, url: &str) -> serde_json::Value {
    serde_json::json!({"type": "file", "name": name, "url": url, "title": name})
}

fn fixture() -> TreeStore {
    tree(serde_json::json!({
        "root": [
            {"type": "folder", "name": "reading", "children": [
                link("a.lnk", "https://a.example"),
                {"type": "folder", "name": "deep", "children": [link("b.lnk", "https://b.example")]}
            ]},
            {"type": "folder", "name": "shared", "children": [link("c.lnk", "https://c.example")]},
            {"type": "folder", "name": "tools", "children": []}
        ]
    }))
}

#[test]
fn find_file_searches_nested_folders() {
    let store = fixture();
    let file = store.find_file("https://b.example").expect("nested file");
    assert_eq!(file.name, "b.lnk");
    assert!(store.find_file("https://missing.example").is_none());
}

#[test]
fn insert_appends_to_first_matching_top_level_folder() {
    let mut store = fixture();
    store
        .insert("tools", File::link("https://d.example", Some("D".to_string())))
        .expect("insert");
    let tools = store.folder("tools").expect("tools folder");
    assert_eq!(tools.children.len(), 1);
    assert_eq!(tools.children[0].name(), "d.lnk");
}

#[test]
fn insert_into_missing_folder_reports_not_found_and_leaves_tree() {
    let mut store = fixture();
    let before = store.clone();
    let err = store
        .insert("nope", File::link("https://d.example", None))
        .expect_err("missing folder");
    assert_eq!(err, TreeError::FolderNotFound("nope".to_string()));
    assert_eq!(store, before);
}

#[test]
fn insert_does_not_descend_into_nested_folders() {
    let mut store = fixture();
    assert!(store.insert("deep", File::link("https://d.example", None)).is_err());
}

#[test]
fn move_preserves_fields_and_order() {
    let mut store = fixture();
    store
        .upsert_review(
            "https://a.example",
            Review {
                user: "ana".to_string(),
                text: "good".to_string(),
            },
        )
        .expect("review");
    store.move_file("https://a.example", "tools").expect("move");

    assert_eq!(store.parent_folder_name("https://a.example"), Some("tools"));
    let moved = store.find_file("https://a.example").expect("moved file");
    assert_eq!(moved.reviews.len(), 1);
    assert_eq!(moved.title, "a.lnk");

    let reading = store.folder("reading").expect("reading");
    assert_eq!(reading.children.len(), 1);
    assert_eq!(reading.children[0].name(), "deep");
}

#[test]
fn move_to_missing_folder_keeps_file_in_place() {
    let mut store = fixture();
    let err = store
        .move_file("https://a.example", "nope")
        .expect_err("missing target");
    assert_eq!(err, TreeError::FolderNotFound("nope".to_string()));
    assert_eq!(store.parent_folder_name("https://a.example"), Some("reading"));
}

#[test]
fn move_missing_file_reports_file_not_found() {
    let mut store = fixture();
    let err = store
        .move_file("https://missing.example", "tools")
        .expect_err("missing file");
    assert_eq!(
        err,
        TreeError::FileNotFound("https://missing.example".to_string())
    );
}

#[test]
fn remove_deletes_first_duplicate_only() {
    let mut store = tree(serde_json::json!({
        "root": [
            {"type": "folder", "name": "outer", "children": [
                {"type": "folder", "name": "inner", "children": [link("dup-1.lnk", "https://dup.example")]},
                link("dup-2.lnk", "https://dup.example")
            ]},
            {"type": "folder", "name": "other", "children": [link("dup-3.lnk", "https://dup.example")]}
        ]
    }));
    assert_eq!(store.duplicate_urls().get("https://dup.example"), Some(&3));
    let nodes = store.node_count();

    assert!(store.remove("https://dup.example"));

    assert_eq!(store.node_count(), nodes - 1);
    let remaining = store.find_file("https://dup.example").expect("remaining");
    assert_eq!(remaining.name, "dup-2.lnk");
    assert_eq!(store.duplicate_urls().get("https://dup.example"), Some(&2));
}

#[test]
fn remove_missing_returns_false() {
    let mut store = fixture();
    let nodes = store.node_count();
    assert!(!store.remove("https://missing.example"));
    assert_eq!(store.node_count(), nodes);
}

#[test]
fn upsert_review_replaces_same_user() {
    let mut store = fixture();
    for text in ["first", "second"] {
        store
            .upsert_review(
                "https://c.example",
                Review {
                    user: "ana".to_string(),
                    text: text.to_string(),
                },
            )
            .expect("review");
    }
    let file = store.find_file("https://c.example").expect("file");
    assert_eq!(file.reviews.len(), 1);
    assert_eq!(file.reviews[0].text, "second");
}

#[test]
fn archive_creates_folder_when_absent() {
    let mut store = fixture();
    assert!(!store.has_folder(ARCHIVE_FOLDER));
    store.archive("https://c.example").expect("archive");
    assert_eq!(
        store.parent_folder_name("https://c.example"),
        Some(ARCHIVE_FOLDER)
    );
    assert_eq!(store.root().last().map(Node::name), Some(ARCHIVE_FOLDER));
    assert!(store.folder(SHARED_FOLDER).expect("shared").children.is_empty());
}

#[test]
fn shared_means_direct_child_of_top_level_shared_folder() {
    let store = tree(serde_json::json!({
        "root": [
            {"type": "folder", "name": "shared", "children": [
                link("top.lnk", "https://top.example"),
                {"type": "folder", "name": "sub", "children": [link("sub.lnk", "https://sub.example")]}
            ]},
            {"type": "folder", "name": "misc", "children": [
                {"type": "folder", "name": "shared", "children": [link("fake.lnk", "https://fake.example")]}
            ]}
        ]
    }));
    assert!(store.is_shared("https://top.example"));
    assert!(!store.is_shared("https://sub.example"));
    assert!(!store.is_shared("https://fake.example"));
    assert!(!store.is_shared("https://missing.example"));
}

#[test]
fn only_the_first_shared_folder_counts() {
    let store = tree(serde_json::json!({
        "root": [
            {"type": "folder", "name": "shared", "children": [link("one.lnk", "https://one.example")]},
            {"type": "folder", "name": "shared", "children": [link("two.lnk", "https://two.example")]}
        ]
    }));
    assert!(store.is_shared("https://one.example"));
    assert!(!store.is_shared("https://two.example"));
}

#[test]
fn apply_reports_lookup_misses() {
    let mut store = fixture();
    let err = store
        .apply(&Command::Delete {
            url: "https://missing.example".to_string(),
        })
        .expect_err("missing delete");
    assert!(matches!(err, TreeError::FileNotFound(_)));
}

#[test]
fn load_fetched_keeps_previous_tree_on_failure() {
    let mut store = fixture();
    let before = store.clone();
    assert!(
        store
            .load_fetched(Err(anyhow::anyhow!("connection refused")))
            .is_none()
    );
    assert_eq!(store, before);
}
