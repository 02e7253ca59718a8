// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration and workspace-root resolution.

use std::path::{Path, PathBuf};

/// Environment variable overriding where build workspaces are created.
pub const WORKSPACE_ROOT_ENV: &str = "PEASANT_BUILD_DIR";

/// Queue engine configuration.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum number of builds executing at once. Further admissions wait
    /// FIFO; nothing is dropped.
    pub max_concurrency: usize,
    /// Capacity of the completion broadcast channel.
    pub completion_capacity: usize,
    /// Capacity of the submission channel. Live submissions buffer here
    /// while startup recovery drains persisted pending records.
    pub submission_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { max_concurrency: 2, completion_capacity: 64, submission_capacity: 64 }
    }
}

impl QueueConfig {
    peasant_core::setters! {
        set {
            max_concurrency: usize,
            completion_capacity: usize,
            submission_capacity: usize,
        }
    }
}

/// Resolve the workspace root: per-build override, then the
/// `PEASANT_BUILD_DIR` environment variable, then the OS temp directory.
pub fn resolve_workspace_root(override_root: Option<&Path>) -> PathBuf {
    if let Some(root) = override_root {
        return root.to_path_buf();
    }
    if let Ok(dir) = std::env::var(WORKSPACE_ROOT_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    std::env::temp_dir()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
