// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-build execution state machine.
//!
//! Workspace preparation → script acquisition → process execution →
//! result recording. Every failure on the way is funneled into the
//! recording step: the error text becomes the last output line and the
//! exit code lands in the durable result record. Nothing escapes.

use crate::config;
use crate::error::BuildError;
use crate::intake::Submission;
use crate::registry::InFlightRegistry;
use peasant_adapters::{
    LaunchSpec, ProcessRunner, ProvisionError, RepoHost, ScriptFetcher, WorkspaceProvisioner,
};
use peasant_core::{
    raw_script_url, script_file_name, script_rel_path, workspace_dir_name, BuildRecord, OutputSink,
    RepoSlug,
};
use peasant_storage::RecordStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, Semaphore};

/// Shared dependencies of every executor task.
pub(crate) struct ExecutorCtx {
    pub store: RecordStore,
    pub registry: InFlightRegistry,
    pub limiter: Arc<Semaphore>,
    pub completions: broadcast::Sender<BuildRecord>,
    pub provisioner: Arc<dyn WorkspaceProvisioner>,
    pub host: Arc<dyn RepoHost>,
    pub fetcher: Arc<dyn ScriptFetcher>,
    pub runner: Arc<dyn ProcessRunner>,
}

/// Drive one admitted build to its terminal record.
pub(crate) async fn run_build(ctx: &ExecutorCtx, submission: Submission, sink: OutputSink) {
    let id = submission.record.id;
    tracing::info!(%id, repo = %submission.record.repo_url, "build started");

    let exit_code = match execute(ctx, &submission, &sink).await {
        Ok(code) => code,
        Err(err) => {
            sink.push_line(&err.to_string());
            err.exit_code()
        }
    };

    record_outcome(ctx, submission, sink, exit_code).await;
}

/// The happy path through the state machine. Returns the child's exit code
/// (always zero; non-zero exits are reported as [`BuildError::NonZeroExit`]).
async fn execute(
    ctx: &ExecutorCtx,
    submission: &Submission,
    sink: &OutputSink,
) -> Result<i32, BuildError> {
    let record = &submission.record;
    validate_script_url(ctx, record).await?;

    let workspace = prepare_workspace(ctx, submission).await?;
    let script = acquire_script(ctx, record, &workspace).await?;

    let spec = LaunchSpec::for_script(&script, &workspace);
    let code = ctx
        .runner
        .run(spec, sink.clone())
        .await
        .map_err(|e| BuildError::Launch(e.to_string()))?;
    if code != 0 {
        return Err(BuildError::NonZeroExit(code));
    }
    Ok(code)
}

/// Policy gate on the build-script URL.
///
/// A script owned by our own account is always allowed; anything else must
/// name a repository the host client can resolve. Intentionally
/// permissive.
async fn validate_script_url(ctx: &ExecutorCtx, record: &BuildRecord) -> Result<(), BuildError> {
    let slug = RepoSlug::parse(&record.build_script_url).ok_or_else(|| {
        BuildError::UrlForbidden(format!(
            "not a source-hosting URL: {}",
            record.build_script_url
        ))
    })?;

    if slug.owner.eq_ignore_ascii_case(ctx.host.login()) {
        return Ok(());
    }
    match ctx.host.repo_exists(&slug).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(BuildError::UrlForbidden(format!(
            "{} is not an accessible repository",
            slug
        ))),
        Err(err) => Err(BuildError::UrlForbidden(format!(
            "could not resolve {}: {}",
            slug, err
        ))),
    }
}

/// Compute the build's workspace directory and have the provisioner fill
/// it with the requested commit's tree.
async fn prepare_workspace(
    ctx: &ExecutorCtx,
    submission: &Submission,
) -> Result<PathBuf, BuildError> {
    let record = &submission.record;
    let root = config::resolve_workspace_root(submission.workspace_root.as_deref());
    let workspace = root.join(workspace_dir_name(&record.repo_url));

    tokio::fs::create_dir_all(&workspace)
        .await
        .map_err(|e| BuildError::Workspace(e.to_string()))?;

    ctx.provisioner
        .prepare(&workspace, &record.repo_url, &record.commit, &ctx.host.credentials())
        .await
        .map_err(|e| match e {
            ProvisionError::CommitNotFound(commit) => BuildError::CommitNotFound(commit),
            other => BuildError::Workspace(other.to_string()),
        })?;

    Ok(workspace)
}

/// Locate or download the build script.
///
/// A script hosted in the repository being built is already in the
/// checkout; anything else is downloaded in its raw, commit-pinned form
/// into the workspace.
async fn acquire_script(
    ctx: &ExecutorCtx,
    record: &BuildRecord,
    workspace: &std::path::Path,
) -> Result<PathBuf, BuildError> {
    let script_slug = RepoSlug::parse(&record.build_script_url);
    let repo_slug = RepoSlug::parse(&record.repo_url);
    if let (Some(script), Some(repo)) = (&script_slug, &repo_slug) {
        if script.same_repo(repo) {
            let rel = script_rel_path(&record.build_script_url).ok_or_else(|| {
                BuildError::ScriptFetch(format!(
                    "cannot derive script path from {}",
                    record.build_script_url
                ))
            })?;
            return Ok(workspace.join(rel));
        }
    }

    let raw = raw_script_url(&record.build_script_url, &record.commit);
    let dest = workspace.join(script_file_name(&record.build_script_url));
    ctx.fetcher
        .fetch(&raw, &dest)
        .await
        .map_err(|e| BuildError::ScriptFetch(e.to_string()))?;
    Ok(dest)
}

/// Recording step, shared by every terminal outcome.
///
/// Order matters: the result write lands before the queued entry is
/// dropped (a crash in between leaves both keys and recovery trusts the
/// result), and the build leaves the registry before its completion event
/// is published. Store failures here are logged, not raised; the
/// completion still reaches the caller.
async fn record_outcome(
    ctx: &ExecutorCtx,
    submission: Submission,
    sink: OutputSink,
    exit_code: i32,
) {
    sink.close();

    let mut record = submission.record;
    record.output = sink.current();
    record.exit_code = Some(exit_code);
    let id = record.id;

    if let Err(err) = ctx.store.put_result(&record).await {
        tracing::error!(%id, error = %err, "failed to persist result record");
    }
    if let Err(err) = ctx.store.invalidate_queued(id).await {
        tracing::error!(%id, error = %err, "failed to drop queued record");
    }

    ctx.registry.remove(id);

    // No live subscribers is fine for both sends.
    let _ = ctx.completions.send(record.clone());
    if let Some(done) = submission.done {
        let _ = done.send(record.clone());
    }

    tracing::info!(%id, exit_code, succeeded = record.succeeded(), "build finished");
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
