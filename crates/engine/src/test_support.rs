// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake adapters and helpers for engine tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::queue::QueueDeps;
use async_trait::async_trait;
use parking_lot::Mutex;
use peasant_adapters::{
    Credentials, FetchError, LaunchError, LaunchSpec, ProcessRunner, ProvisionError,
    ScriptFetcher, StaticRepoHost, WorkspaceProvisioner,
};
use peasant_core::test_support::TEST_REPO_URL;
use peasant_core::{OutputSink, RepoSlug};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Login under which test engines run; matches the owner of
/// [`peasant_core::test_support::TEST_SCRIPT_URL`], so the default script
/// passes the own-account rule.
pub const TEST_LOGIN: &str = "acme";

/// Provisioner that touches no filesystem and records its calls.
#[derive(Default)]
pub struct FakeProvisioner {
    pub mode: ProvisionMode,
    pub calls: Mutex<Vec<(PathBuf, String)>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProvisionMode {
    #[default]
    Succeed,
    CommitNotFound,
    Fail,
}

impl FakeProvisioner {
    pub fn new(mode: ProvisionMode) -> Self {
        Self { mode, calls: Mutex::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl WorkspaceProvisioner for FakeProvisioner {
    async fn prepare(
        &self,
        dir: &Path,
        _repo_url: &str,
        commit: &str,
        _credentials: &Credentials,
    ) -> Result<(), ProvisionError> {
        self.calls.lock().push((dir.to_path_buf(), commit.to_string()));
        match self.mode {
            ProvisionMode::Succeed => Ok(()),
            ProvisionMode::CommitNotFound => {
                Err(ProvisionError::CommitNotFound(commit.to_string()))
            }
            ProvisionMode::Fail => Err(ProvisionError::Git("disk on fire".to_string())),
        }
    }
}

/// Fetcher that records requested URLs instead of touching the network.
#[derive(Default)]
pub struct FakeFetcher {
    pub fail: bool,
    pub fetched: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeFetcher {
    pub fn failing() -> Self {
        Self { fail: true, fetched: Mutex::new(Vec::new()) }
    }

    pub fn urls(&self) -> Vec<String> {
        self.fetched.lock().iter().map(|(url, _)| url.clone()).collect()
    }
}

#[async_trait]
impl ScriptFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        self.fetched.lock().push((url.to_string(), dest.to_path_buf()));
        if self.fail {
            return Err(FetchError::Http("404 not found".to_string()));
        }
        Ok(())
    }
}

/// Runner with a scripted outcome, shared by every build it runs.
#[derive(Default)]
pub struct ScriptedRunner {
    pub lines: Vec<String>,
    pub exit_code: i32,
    pub fail_spawn: Option<String>,
    pub specs: Mutex<Vec<LaunchSpec>>,
}

impl ScriptedRunner {
    pub fn emitting(lines: &[&str], exit_code: i32) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            exit_code,
            ..Self::default()
        }
    }

    /// Runner whose spawn fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self { fail_spawn: Some(message.to_string()), ..Self::default() }
    }

    pub fn run_count(&self) -> usize {
        self.specs.lock().len()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, spec: LaunchSpec, sink: OutputSink) -> Result<i32, LaunchError> {
        self.specs.lock().push(spec);
        if let Some(message) = &self.fail_spawn {
            return Err(LaunchError::Spawn {
                program: message.clone(),
                source: std::io::Error::other(message.clone()),
            });
        }
        for line in &self.lines {
            sink.push_line(line);
        }
        Ok(self.exit_code)
    }
}

/// Runner that blocks every build on a shared latch until released.
pub struct LatchRunner {
    gate: Semaphore,
    started: AtomicUsize,
}

impl LatchRunner {
    pub fn new() -> Self {
        Self { gate: Semaphore::new(0), started: AtomicUsize::new(0) }
    }

    /// Number of builds that have reached the runner.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Let `n` blocked builds finish.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }
}

impl Default for LatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for LatchRunner {
    async fn run(&self, _spec: LaunchSpec, sink: OutputSink) -> Result<i32, LaunchError> {
        sink.push_line("building");
        self.started.fetch_add(1, Ordering::SeqCst);
        if let Ok(permit) = self.gate.acquire().await {
            // Consume the permit so each release() lets exactly one through.
            permit.forget();
        }
        sink.push_line("released");
        Ok(0)
    }
}

/// Host whose login owns the canonical test repository.
pub fn test_host() -> StaticRepoHost {
    StaticRepoHost::new(TEST_LOGIN, Credentials::anonymous())
        .with_repo(&RepoSlug::parse(TEST_REPO_URL).expect("test repo url parses"))
}

/// Queue deps wired with fakes everywhere but the given cache and runner.
pub fn fake_deps(
    cache: Arc<dyn peasant_storage::BlobCache>,
    runner: Arc<dyn ProcessRunner>,
) -> QueueDeps {
    QueueDeps {
        cache,
        provisioner: Arc::new(FakeProvisioner::default()),
        host: Arc::new(test_host()),
        fetcher: Arc::new(FakeFetcher::default()),
        runner,
    }
}

/// Poll `cond` until it holds or the timeout elapses.
pub async fn wait_until(cond: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}
