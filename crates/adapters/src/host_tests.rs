// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn slug(owner: &str, name: &str) -> RepoSlug {
    RepoSlug { owner: owner.to_string(), name: name.to_string() }
}

#[tokio::test]
async fn registered_repos_exist() {
    let host = StaticRepoHost::new("builder", Credentials::anonymous())
        .with_repo(&slug("acme", "widgets"));

    assert!(host.repo_exists(&slug("acme", "widgets")).await.unwrap());
    assert!(!host.repo_exists(&slug("acme", "gadgets")).await.unwrap());
}

#[tokio::test]
async fn lookup_is_case_insensitive() {
    let host = StaticRepoHost::new("builder", Credentials::anonymous())
        .with_repo(&slug("Acme", "Widgets"));

    assert!(host.repo_exists(&slug("acme", "widgets")).await.unwrap());
}

#[test]
fn exposes_login_and_credentials() {
    let creds = Credentials::new("builder", "token");
    let host = StaticRepoHost::new("builder", creds.clone());

    assert_eq!(host.login(), "builder");
    assert_eq!(host.credentials(), creds);
}
