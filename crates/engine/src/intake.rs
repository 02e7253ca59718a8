// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission intake: recovery replay spliced ahead of live traffic, then
//! bounded admission into the executor.
//!
//! A single pump task owns ordering. At start it drains the durable
//! `queued/*` records in ascending id order; live submissions buffer in the
//! channel until the replay is done, so a recovered build is always
//! admitted before any fresh one.

use crate::executor::{self, ExecutorCtx};
use crate::registry::LiveBuild;
use peasant_core::{BuildRecord, DEFAULT_PRIORITY};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// One build heading into the admission queue.
pub(crate) struct Submission {
    pub record: BuildRecord,
    /// Per-build workspace-root override; recovered builds have none.
    pub workspace_root: Option<PathBuf>,
    /// Accepted for interface compatibility; a single level is scheduled.
    pub priority: u32,
    /// Resolves the caller's enqueue future. Absent for recovered builds.
    pub done: Option<oneshot::Sender<BuildRecord>>,
}

impl Submission {
    pub fn recovered(record: BuildRecord) -> Self {
        Self { record, workspace_root: None, priority: DEFAULT_PRIORITY, done: None }
    }
}

/// Pump task: replay the records snapshotted at start, then drain live
/// submissions. Runs until the submission channel closes.
///
/// `recovered` is enumerated by [`BuildQueue::start`] before the handle
/// exists, so no live submission can appear both in the snapshot and on
/// the channel.
///
/// [`BuildQueue::start`]: crate::queue::BuildQueue::start
pub(crate) async fn pump(
    ctx: Arc<ExecutorCtx>,
    recovered: Vec<BuildRecord>,
    mut rx: mpsc::Receiver<Submission>,
) {
    replay_recovered(&ctx, recovered).await;

    while let Some(submission) = rx.recv().await {
        admit(&ctx, submission).await;
    }
}

/// Drive every surviving recovered record through admission, oldest id
/// first. A queued entry shadowed by a `result/<id>` is a leftover from a
/// crash mid-transition: the result is authoritative, so the stale entry
/// is dropped instead of re-run.
async fn replay_recovered(ctx: &Arc<ExecutorCtx>, records: Vec<BuildRecord>) {
    if records.is_empty() {
        return;
    }
    tracing::info!(count = records.len(), "replaying recovered builds");

    for record in records {
        let id = record.id;
        match ctx.store.get_result(id).await {
            Ok(Some(_)) => {
                tracing::warn!(%id, "stale queued entry shadowed by result; dropping");
                if let Err(err) = ctx.store.invalidate_queued(id).await {
                    tracing::error!(%id, error = %err, "failed to drop stale queued entry");
                }
            }
            Ok(None) => admit(ctx, Submission::recovered(record)).await,
            Err(err) => {
                // Can't tell whether the build already completed; re-running
                // keeps the at-least-once contract.
                tracing::error!(%id, error = %err, "result lookup failed; re-running");
                admit(ctx, Submission::recovered(record)).await;
            }
        }
    }
}

/// Admission gate: waits for an execution slot (FIFO in pump order), then
/// registers the build as in-flight and spawns its executor. The permit
/// travels into the executor task and frees a slot when recording is done.
async fn admit(ctx: &Arc<ExecutorCtx>, submission: Submission) {
    let Ok(permit) = ctx.limiter.clone().acquire_owned().await else {
        // The semaphore is never closed while the engine runs.
        return;
    };
    tracing::debug!(
        id = %submission.record.id,
        priority = submission.priority,
        recovered = submission.done.is_none(),
        "build admitted"
    );

    let live = LiveBuild::new(submission.record.clone());
    let sink = live.sink.clone();
    ctx.registry.insert(live);

    let ctx = Arc::clone(ctx);
    tokio::spawn(async move {
        executor::run_build(&ctx, submission, sink).await;
        drop(permit);
    });
}
