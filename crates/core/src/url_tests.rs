// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[test]
fn parses_owner_and_name() {
    let slug = RepoSlug::parse("https://example.com/acme/widgets").unwrap();
    assert_eq!(slug.owner, "acme");
    assert_eq!(slug.name, "widgets");
}

#[test]
fn parse_strips_dot_git_suffix() {
    let slug = RepoSlug::parse("https://example.com/acme/widgets.git").unwrap();
    assert_eq!(slug.name, "widgets");
}

#[test]
fn parse_accepts_deeper_paths() {
    let slug =
        RepoSlug::parse("https://example.com/acme/widgets/blob/master/build.cmd").unwrap();
    assert_eq!(slug.to_string(), "acme/widgets");
}

#[test]
fn parse_rejects_non_http_and_short_paths() {
    assert!(RepoSlug::parse("git@example.com:acme/widgets.git").is_none());
    assert!(RepoSlug::parse("https://example.com/acme").is_none());
    assert!(RepoSlug::parse("not a url").is_none());
}

#[test]
fn same_repo_ignores_case() {
    let a = RepoSlug::parse("https://example.com/Acme/Widgets").unwrap();
    let b = RepoSlug::parse("https://example.com/acme/widgets").unwrap();
    assert!(a.same_repo(&b));

    let c = RepoSlug::parse("https://example.com/acme/gadgets").unwrap();
    assert!(!a.same_repo(&c));
}

#[test]
fn rel_path_strips_blob_and_ref() {
    let rel =
        script_rel_path("https://example.com/acme/widgets/blob/master/scripts/build.cmd").unwrap();
    assert_eq!(rel, std::path::Path::new("scripts").join("build.cmd"));
}

#[test]
fn rel_path_without_blob_uses_remainder() {
    let rel = script_rel_path("https://example.com/acme/widgets/scripts/build.cmd").unwrap();
    assert_eq!(rel, std::path::Path::new("scripts").join("build.cmd"));
}

#[test]
fn rel_path_requires_a_file_segment() {
    assert!(script_rel_path("https://example.com/acme/widgets/blob/master").is_none());
    assert!(script_rel_path("https://example.com/acme/widgets").is_none());
}

#[test]
fn raw_url_rewrites_blob_and_master() {
    let raw = raw_script_url(
        "https://example.com/acme/widgets/blob/master/build.cmd",
        "abc123",
    );
    assert_eq!(raw, "https://example.com/acme/widgets/raw/abc123/build.cmd");
}

#[test]
fn raw_url_replaces_only_the_first_occurrence() {
    let raw = raw_script_url(
        "https://example.com/acme/widgets/blob/master/master/build.cmd",
        "abc123",
    );
    assert_eq!(
        raw,
        "https://example.com/acme/widgets/raw/abc123/master/build.cmd"
    );
}

#[test]
fn file_name_is_last_segment() {
    assert_eq!(
        script_file_name("https://example.com/acme/widgets/blob/master/build.cmd"),
        "build.cmd"
    );
    assert_eq!(script_file_name("https://example.com/x/y/run.ps1"), "run.ps1");
}

#[test]
fn workspace_dir_name_is_stable_and_prefixed() {
    let a = workspace_dir_name("https://example.com/acme/widgets");
    let b = workspace_dir_name("https://example.com/acme/widgets");
    let c = workspace_dir_name("https://example.com/acme/gadgets");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.starts_with("Build_"));
    // sha1 hex digest
    assert_eq!(a.len(), "Build_".len() + 40);
}

proptest! {
    #[test]
    fn parse_never_panics(url in ".{0,200}") {
        let _ = RepoSlug::parse(&url);
        let _ = script_rel_path(&url);
        let _ = script_file_name(&url);
    }

    #[test]
    fn parsed_slug_round_trips_through_display(
        owner in "[A-Za-z0-9_-]{1,20}",
        name in "[A-Za-z0-9_-]{1,20}",
    ) {
        let url = format!("https://example.com/{}/{}", owner, name);
        let slug = RepoSlug::parse(&url).unwrap();
        prop_assert_eq!(slug.to_string(), format!("{}/{}", owner, name));
    }
}
