// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public handle to the build queue.

use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::executor::ExecutorCtx;
use crate::intake::{self, Submission};
use crate::registry::InFlightRegistry;
use peasant_adapters::{ProcessRunner, RepoHost, ScriptFetcher, WorkspaceProvisioner};
use peasant_core::{BuildId, BuildRecord, BuildRequest, IdAllocator};
use peasant_storage::{BlobCache, RecordStore};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};

/// External collaborators the engine is built from.
pub struct QueueDeps {
    pub cache: Arc<dyn BlobCache>,
    pub provisioner: Arc<dyn WorkspaceProvisioner>,
    pub host: Arc<dyn RepoHost>,
    pub fetcher: Arc<dyn ScriptFetcher>,
    pub runner: Arc<dyn ProcessRunner>,
}

/// An accepted submission: the allocated id plus the completion future.
pub struct BuildTicket {
    pub id: BuildId,
    done: oneshot::Receiver<BuildRecord>,
}

impl BuildTicket {
    /// Wait for the build's terminal record. Build failure is not an
    /// error here; it arrives as a non-zero `exit_code` in the record.
    pub async fn wait(self) -> Result<BuildRecord, QueueError> {
        self.done.await.map_err(|_| QueueError::Shutdown)
    }
}

/// The persistent build queue.
///
/// Dropping the handle closes the submission bus; already-admitted builds
/// run to completion on the runtime.
pub struct BuildQueue {
    tx: mpsc::Sender<Submission>,
    ids: Arc<IdAllocator>,
    store: RecordStore,
    registry: InFlightRegistry,
    completions: broadcast::Sender<BuildRecord>,
}

impl BuildQueue {
    /// Start the engine: seed the id allocator from the store, snapshot
    /// the persisted pending builds, then spawn the intake pump, which
    /// replays the snapshot ahead of live submissions.
    pub async fn start(config: QueueConfig, deps: QueueDeps) -> Result<Self, QueueError> {
        let store = RecordStore::new(deps.cache);
        let max_id = store.max_id().await?;
        let ids = Arc::new(IdAllocator::seeded(max_id));
        // Snapshot before the handle exists so a racing submission can
        // never be replayed and delivered live at the same time.
        let recovered = store.list_queued().await?;
        let registry = InFlightRegistry::new();
        let (completions, _) = broadcast::channel(config.completion_capacity);
        let (tx, rx) = mpsc::channel(config.submission_capacity);

        let ctx = Arc::new(ExecutorCtx {
            store: store.clone(),
            registry: registry.clone(),
            limiter: Arc::new(tokio::sync::Semaphore::new(config.max_concurrency)),
            completions: completions.clone(),
            provisioner: deps.provisioner,
            host: deps.host,
            fetcher: deps.fetcher,
            runner: deps.runner,
        });
        tokio::spawn(intake::pump(ctx, recovered, rx));

        tracing::info!(
            max_concurrency = config.max_concurrency,
            next_id = max_id + 1,
            "build queue started"
        );
        Ok(Self { tx, ids, store, registry, completions })
    }

    /// Accept a build: allocate its id, write the pending record durably,
    /// and hand it to the intake pump. Returns once the record is durable;
    /// the ticket resolves when the build completes.
    pub async fn submit(&self, request: BuildRequest) -> Result<BuildTicket, QueueError> {
        let id = self.ids.allocate();
        let record = BuildRecord::queued(id, &request);
        self.store.put_queued(&record).await?;

        let (done_tx, done_rx) = oneshot::channel();
        let submission = Submission {
            record,
            workspace_root: request.workspace_root,
            priority: request.priority,
            done: Some(done_tx),
        };
        self.tx.send(submission).await.map_err(|_| QueueError::Shutdown)?;

        tracing::info!(%id, repo = %request.repo_url, commit = %request.commit, "build enqueued");
        Ok(BuildTicket { id, done: done_rx })
    }

    /// Submit and wait for the terminal record.
    pub async fn enqueue(&self, request: BuildRequest) -> Result<BuildRecord, QueueError> {
        self.submit(request).await?.wait().await
    }

    /// Current output and exit code for a build, live or finished.
    ///
    /// Resolution order: in-flight registry (live output so far), then the
    /// durable pending record, then the durable result.
    pub async fn output(&self, id: BuildId) -> Result<(String, Option<i32>), QueueError> {
        if let Some(live) = self.registry.get(id) {
            return Ok((live.sink.current(), live.record.exit_code));
        }
        if self.store.get_queued(id).await?.is_some() {
            return Ok((format!("Build queued, ID is {}", id), None));
        }
        if let Some(record) = self.store.get_result(id).await? {
            return Ok((record.output, record.exit_code));
        }
        Err(QueueError::UnknownBuild(id))
    }

    /// Every completed build is published here, recovered builds included.
    pub fn subscribe_completions(&self) -> broadcast::Receiver<BuildRecord> {
        self.completions.subscribe()
    }

    /// Ids of builds currently admitted and running.
    pub fn in_flight(&self) -> Vec<BuildId> {
        self.registry.ids()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
