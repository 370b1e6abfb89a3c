use super::*;
use crate::model::Command;

fn hosted(hostname: &str, pathname: &str) -> HostingLocation {
    HostingLocation {
        hostname: hostname.to_string(),
        pathname: pathname.to_string(),
    }
}

#[test]
fn pages_host_maps_to_account_and_repository() {
    assert_eq!(hosted("alice.github.io", "/links/").repo_path(), "alice/links");
}

#[test]
fn empty_path_falls_back_to_default_repository() {
    assert_eq!(hosted("alice.github.io", "/").repo_path(), "alice/bookmarks");
}

#[test]
fn only_one_slash_is_stripped_from_each_end() {
    assert_eq!(
        hosted("alice.github.io", "//links//").repo_path(),
        "alice//links/"
    );
    assert_eq!(hosted("alice.github.io", "links").repo_path(), "alice/links");
}

#[test]
fn single_label_host_uses_placeholder() {
    assert_eq!(hosted("localhost", "/links").repo_path(), PLACEHOLDER_REPO);
}

#[test]
fn hosting_location_parses_address() {
    let loc = HostingLocation::parse("https://bo.github.io/marks").expect("parse");
    assert_eq!(loc.hostname, "bo.github.io");
    assert_eq!(loc.repo_path(), "bo/marks");
}

#[test]
fn fixed_repo_trims_slashes() {
    assert_eq!(FixedRepo("/ana/links/".to_string()).repo_path(), "ana/links");
}

#[test]
fn issue_url_percent_encodes_the_request_body() {
    let request = ChangeRequest {
        commands: vec![Command::Merge {
            url: "https://x.example/a b".to_string(),
        }],
    };
    let url = issue_url("ana/links", &request).expect("issue url");
    assert!(url.starts_with("https://github.com/ana/links/issues/new?title=batch:update&body="));

    let body = url.split("&body=").nth(1).expect("body param");
    assert!(!body.contains(' '));
    assert!(!body.contains('{'));
    let decoded = urlencoding::decode(body).expect("decode body");
    let parsed: ChangeRequest = serde_json::from_str(&decoded).expect("parse body");
    assert_eq!(parsed, request);
}
