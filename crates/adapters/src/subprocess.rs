// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess helper with timeout enforcement.

use std::process::Output;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Timeout for individual git operations (clone may pull a large history).
pub const GIT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// Errors from subprocess execution.
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("{what} failed to start: {source}")]
    Spawn {
        what: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{what} timed out after {timeout:?}")]
    Timeout { what: String, timeout: Duration },
}

/// Run a command to completion, capturing output, killing it on timeout.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    what: &str,
) -> Result<Output, SubprocessError> {
    cmd.kill_on_drop(true);
    let fut = cmd.output();
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(SubprocessError::Spawn { what: what.to_string(), source }),
        Err(_) => {
            tracing::warn!(what, ?timeout, "subprocess timed out");
            Err(SubprocessError::Timeout { what: what.to_string(), timeout })
        }
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
