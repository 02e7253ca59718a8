// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults() {
    let config = QueueConfig::default();
    assert_eq!(config.max_concurrency, 2);
    assert!(config.completion_capacity > 0);
    assert!(config.submission_capacity > 0);
}

#[test]
fn setters_override_defaults() {
    let config = QueueConfig::default().max_concurrency(1).completion_capacity(8);
    assert_eq!(config.max_concurrency, 1);
    assert_eq!(config.completion_capacity, 8);
}

#[test]
fn workspace_root_resolution_chain() {
    // Override wins over everything.
    let root = resolve_workspace_root(Some(Path::new("/custom/builds")));
    assert_eq!(root, PathBuf::from("/custom/builds"));

    // Environment variable beats the temp dir. Set and unset within one
    // test so the fallback assertion below can't race it.
    std::env::set_var(WORKSPACE_ROOT_ENV, "/from/env");
    assert_eq!(resolve_workspace_root(None), PathBuf::from("/from/env"));
    assert_eq!(
        resolve_workspace_root(Some(Path::new("/custom/builds"))),
        PathBuf::from("/custom/builds")
    );
    std::env::remove_var(WORKSPACE_ROOT_ENV);

    // Temp dir is the last resort.
    assert_eq!(resolve_workspace_root(None), std::env::temp_dir());
}
