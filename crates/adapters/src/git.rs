// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace provisioning via the git CLI.
//!
//! Prepares a directory to hold the tree at one commit of one repository:
//! clone-or-fetch, hard reset, then clean, with the `.gitignore`
//! byte-preserving dance that keeps the clean from sparing generated files
//! the ignore rules would otherwise protect.

use crate::credentials::Credentials;
use crate::subprocess::{run_with_timeout, SubprocessError, GIT_COMMAND_TIMEOUT};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

/// Errors from workspace preparation.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("commit {0} not found after fetch")]
    CommitNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("git error: {0}")]
    Git(String),
}

impl From<SubprocessError> for ProvisionError {
    fn from(e: SubprocessError) -> Self {
        ProvisionError::Git(e.to_string())
    }
}

/// Capability to prepare a directory with the tree at one commit.
#[async_trait]
pub trait WorkspaceProvisioner: Send + Sync {
    /// Make `dir` hold a clean checkout of `commit` from `repo_url`.
    ///
    /// The directory is created if missing and reused (fetch instead of
    /// clone) if it already contains a repository.
    async fn prepare(
        &self,
        dir: &Path,
        repo_url: &str,
        commit: &str,
        credentials: &Credentials,
    ) -> Result<(), ProvisionError>;
}

/// Provisioner that shells out to the `git` CLI.
#[derive(Debug, Clone, Default)]
pub struct GitWorkspaceProvisioner;

#[async_trait]
impl WorkspaceProvisioner for GitWorkspaceProvisioner {
    async fn prepare(
        &self,
        dir: &Path,
        repo_url: &str,
        commit: &str,
        credentials: &Credentials,
    ) -> Result<(), ProvisionError> {
        tokio::fs::create_dir_all(dir).await?;

        let remote = credentials.apply_to_url(repo_url);
        if dir.join(".git").exists() {
            // Fetch by URL so credentials never land in the repo config.
            git(
                dir,
                ["fetch", remote.as_str(), "+refs/heads/*:refs/remotes/origin/*"],
                "git fetch",
            )
            .await?;
        } else {
            git(dir, ["clone", remote.as_str(), "."], "git clone").await?;
        }

        reset_hard(dir, commit).await?;
        clean_preserving_gitignore(dir).await?;
        Ok(())
    }
}

/// Run one git command in `dir`, mapping a non-zero exit to [`ProvisionError::Git`].
async fn git<const N: usize>(
    dir: &Path,
    args: [&str; N],
    what: &str,
) -> Result<(), ProvisionError> {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .current_dir(dir)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE");
    let output = run_with_timeout(cmd, GIT_COMMAND_TIMEOUT, what).await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProvisionError::Git(format!("{} failed: {}", what, stderr.trim())));
    }
    Ok(())
}

/// Hard-reset the working tree to `commit`.
///
/// A failed reset after a successful fetch means the commit does not exist
/// in the repository.
async fn reset_hard(dir: &Path, commit: &str) -> Result<(), ProvisionError> {
    match git(dir, ["reset", "--hard", commit], "git reset").await {
        Ok(()) => Ok(()),
        Err(ProvisionError::Git(_)) => Err(ProvisionError::CommitNotFound(commit.to_string())),
        Err(e) => Err(e),
    }
}

/// Remove untracked files while keeping `.gitignore` byte-identical.
///
/// `git clean` honors the ignore rules, which would leave generated files
/// from a previous build in place. Read and delete `.gitignore`, clean,
/// then restore the exact bytes, even when the clean fails.
async fn clean_preserving_gitignore(dir: &Path) -> Result<(), ProvisionError> {
    let gitignore = dir.join(".gitignore");
    let saved = match tokio::fs::read(&gitignore).await {
        Ok(bytes) => {
            tokio::fs::remove_file(&gitignore).await?;
            Some(bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let cleaned = git(dir, ["clean", "-d", "-f"], "git clean").await;

    if let Some(bytes) = saved {
        tokio::fs::write(&gitignore, bytes).await?;
    }
    cleaned
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
