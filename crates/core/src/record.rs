// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build request and record types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Priority assigned to every submission. The admission queue accepts a
/// numeric priority for interface compatibility but schedules a single
/// level, FIFO.
pub const DEFAULT_PRIORITY: u32 = 100;

/// Unique identifier for a build.
///
/// Allocated at intake, strictly increasing for the lifetime of the
/// durable store (restarts included).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct BuildId(pub u64);

impl BuildId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BuildId {
    fn from(n: u64) -> Self {
        BuildId(n)
    }
}

/// A request to build one commit of one repository with one build script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub repo_url: String,
    /// Full hex SHA-1 of the commit to build.
    pub commit: String,
    pub build_script_url: String,
    /// Per-build workspace root override. Never persisted; a recovered
    /// build falls back to the environment/temp-dir chain.
    pub workspace_root: Option<PathBuf>,
    pub priority: u32,
}

impl BuildRequest {
    pub fn new(
        repo_url: impl Into<String>,
        commit: impl Into<String>,
        build_script_url: impl Into<String>,
    ) -> Self {
        Self {
            repo_url: repo_url.into(),
            commit: commit.into(),
            build_script_url: build_script_url.into(),
            workspace_root: None,
            priority: DEFAULT_PRIORITY,
        }
    }

    crate::setters! {
        set { priority: u32 }
        option { workspace_root: PathBuf }
    }
}

/// The durable record of a build.
///
/// Lives under `queued/<id>` while pending (no `exit_code`) and under
/// `result/<id>` once terminal (`exit_code` present). The live output sink
/// is a runtime companion and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: BuildId,
    pub repo_url: String,
    pub commit: String,
    pub build_script_url: String,
    /// Full concatenation of every line the build emitted. Empty until the
    /// recording step samples the sink.
    #[serde(default)]
    pub output: String,
    /// Absent while queued or running; present exactly once terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl BuildRecord {
    /// Create the queued-state record for a request.
    pub fn queued(id: BuildId, req: &BuildRequest) -> Self {
        Self {
            id,
            repo_url: req.repo_url.clone(),
            commit: req.commit.clone(),
            build_script_url: req.build_script_url.clone(),
            output: String::new(),
            exit_code: None,
        }
    }

    /// A build succeeded iff it ran to completion with exit code zero.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// True once the record carries a terminal exit code.
    pub fn is_terminal(&self) -> bool {
        self.exit_code.is_some()
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
