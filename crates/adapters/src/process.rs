// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child-process execution with line-streamed output.

use async_trait::async_trait;
use peasant_core::OutputSink;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Errors from launching the build process.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to execute for one build: program, arguments, working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl LaunchSpec {
    /// Choose the child command for a build script by extension.
    ///
    /// `.cmd` scripts go through the command interpreter, `.ps1` scripts
    /// through the script host; anything else is launched directly.
    pub fn for_script(script: &Path, cwd: &Path) -> Self {
        let script_str = script.display().to_string();
        let extension = script.extension().and_then(|e| e.to_str()).unwrap_or("");
        let (program, args) = match extension {
            "cmd" => ("cmd".into(), vec!["/C".to_string(), format!("\"{}\"", script_str)]),
            "ps1" => (
                "powershell".into(),
                vec![
                    "-ExecutionPolicy".to_string(),
                    "Unrestricted".to_string(),
                    "-NonInteractive".to_string(),
                    "-NoProfile".to_string(),
                    "-Command".to_string(),
                    format!("\"{}\"", script_str),
                ],
            ),
            _ => (script.to_path_buf(), Vec::new()),
        };
        Self { program, args, cwd: cwd.to_path_buf() }
    }
}

/// Capability to run one build process and stream its output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the process to natural termination, pushing each stdout/stderr
    /// line into `sink`, and return the exit code.
    async fn run(&self, spec: LaunchSpec, sink: OutputSink) -> Result<i32, LaunchError>;
}

/// Runner using `tokio::process` with piped, UTF-8 decoded streams.
#[derive(Debug, Clone, Default)]
pub struct LocalProcessRunner;

#[async_trait]
impl ProcessRunner for LocalProcessRunner {
    async fn run(&self, spec: LaunchSpec, sink: OutputSink) -> Result<i32, LaunchError> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: spec.program.display().to_string(),
            source,
        })?;

        // Merge both streams line-by-line into the sink. Stream readers run
        // concurrently with the wait so pipe buffers never fill up.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let out_task = stdout.map(|s| tokio::spawn(forward_lines(s, sink.clone())));
        let err_task = stderr.map(|s| tokio::spawn(forward_lines(s, sink.clone())));

        let status = child.wait().await?;
        if let Some(task) = out_task {
            let _ = task.await;
        }
        if let Some(task) = err_task {
            let _ = task.await;
        }

        Ok(status.code().unwrap_or(-1))
    }
}

/// Push each line of `stream` into the sink until EOF.
async fn forward_lines<R: AsyncRead + Unpin + Send>(stream: R, sink: OutputSink) {
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        sink.push_line(&line);
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
