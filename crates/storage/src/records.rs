// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-key record lifecycle over the blob cache.
//!
//! A build's record lives under `queued/<id>` from durable acceptance until
//! completion, then under `result/<id>` forever. The transition is
//! write-then-delete: a crash between the two leaves both keys, never
//! neither, and recovery treats `result/<id>` as authoritative.

use crate::cache::{BlobCache, CacheError};
use peasant_core::{BuildId, BuildRecord};
use std::sync::Arc;
use thiserror::Error;

const QUEUED_PREFIX: &str = "queued";
const RESULT_PREFIX: &str = "result";

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Facade over the blob cache exposing the build-record lifecycle.
#[derive(Clone)]
pub struct RecordStore {
    cache: Arc<dyn BlobCache>,
}

fn queued_key(id: BuildId) -> String {
    format!("{}/{}", QUEUED_PREFIX, id)
}

fn result_key(id: BuildId) -> String {
    format!("{}/{}", RESULT_PREFIX, id)
}

/// Parse the `<id>` out of a `<prefix>/<id>` cache key.
fn key_id(key: &str) -> Option<u64> {
    key.split_once('/').and_then(|(_, id)| id.parse().ok())
}

impl RecordStore {
    pub fn new(cache: Arc<dyn BlobCache>) -> Self {
        Self { cache }
    }

    /// Persist a pending record under `queued/<id>`. Idempotent.
    pub async fn put_queued(&self, record: &BuildRecord) -> Result<(), StoreError> {
        debug_assert!(record.exit_code.is_none(), "queued record must not carry an exit code");
        let bytes = serde_json::to_vec(record)?;
        self.cache.put(&queued_key(record.id), bytes).await?;
        Ok(())
    }

    /// Persist a terminal record under `result/<id>`. Idempotent.
    pub async fn put_result(&self, record: &BuildRecord) -> Result<(), StoreError> {
        debug_assert!(record.exit_code.is_some(), "result record must carry an exit code");
        let bytes = serde_json::to_vec(record)?;
        self.cache.put(&result_key(record.id), bytes).await?;
        Ok(())
    }

    pub async fn get_queued(&self, id: BuildId) -> Result<Option<BuildRecord>, StoreError> {
        self.get(&queued_key(id)).await
    }

    pub async fn get_result(&self, id: BuildId) -> Result<Option<BuildRecord>, StoreError> {
        self.get(&result_key(id)).await
    }

    /// Drop the `queued/<id>` entry. Removing an absent entry is fine; the
    /// write-then-delete transition may be replayed after a crash.
    pub async fn invalidate_queued(&self, id: BuildId) -> Result<(), StoreError> {
        self.cache.invalidate(&queued_key(id)).await?;
        Ok(())
    }

    /// All pending records in ascending id order.
    pub async fn list_queued(&self) -> Result<Vec<BuildRecord>, StoreError> {
        let mut ids: Vec<u64> = self
            .cache
            .keys(QUEUED_PREFIX)
            .await?
            .iter()
            .filter_map(|k| key_id(k))
            .collect();
        ids.sort_unstable();

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            // A key can disappear between the listing and the read.
            if let Some(record) = self.get_queued(BuildId(id)).await? {
                records.push(record);
            }
        }
        tracing::debug!(count = records.len(), "listed queued records");
        Ok(records)
    }

    /// Maximum id present under either prefix, `0` when the store is empty.
    /// Seeds the id allocator at engine start.
    pub async fn max_id(&self) -> Result<u64, StoreError> {
        let mut max = 0;
        for prefix in [QUEUED_PREFIX, RESULT_PREFIX] {
            for key in self.cache.keys(prefix).await? {
                if let Some(id) = key_id(&key) {
                    max = max.max(id);
                }
            }
        }
        Ok(max)
    }

    async fn get(&self, key: &str) -> Result<Option<BuildRecord>, StoreError> {
        match self.cache.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
