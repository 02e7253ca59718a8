// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types.
//!
//! Execution-path errors ([`BuildError`]) are never raised out of the
//! engine: the executor funnels every one into the recording step, where
//! the error text lands in the build's output and its exit code in the
//! record. Only the query surface raises ([`QueueError`]).

use peasant_core::BuildId;
use peasant_storage::StoreError;
use thiserror::Error;

/// Exit code recorded for failures that never produced a child exit code.
pub const EXCEPTION_EXIT_CODE: i32 = -1;

/// A build's terminal failure, recorded rather than raised.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build script URL forbidden: {0}")]
    UrlForbidden(String),
    #[error("commit not found: {0}")]
    CommitNotFound(String),
    #[error("workspace preparation failed: {0}")]
    Workspace(String),
    #[error("build script download failed: {0}")]
    ScriptFetch(String),
    #[error("failed to launch build process: {0}")]
    Launch(String),
    #[error("build exited with code {0}")]
    NonZeroExit(i32),
}

impl BuildError {
    /// The exit code this failure records: the child's own code when it
    /// ran, [`EXCEPTION_EXIT_CODE`] when it never did.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::NonZeroExit(code) => *code,
            _ => EXCEPTION_EXIT_CODE,
        }
    }
}

/// Errors surfaced to queue callers.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("unknown build: {0}")]
    UnknownBuild(BuildId),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("build queue is shut down")]
    Shutdown,
}
