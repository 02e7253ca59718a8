// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-flight build registry.
//!
//! Maps build id → live handle for every build between admission and
//! completion. Guarded by a single lock; holders perform only map
//! mutations under it.

use parking_lot::Mutex;
use peasant_core::{BuildId, BuildRecord, OutputSink};
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory companion of a running build: its record (no exit code yet)
/// and the sink collecting its output.
#[derive(Debug, Clone)]
pub struct LiveBuild {
    pub record: BuildRecord,
    pub sink: OutputSink,
}

impl LiveBuild {
    pub fn new(record: BuildRecord) -> Self {
        debug_assert!(record.exit_code.is_none(), "in-flight record must not carry an exit code");
        Self { record, sink: OutputSink::new() }
    }
}

/// Registry of builds currently admitted and running.
#[derive(Debug, Clone, Default)]
pub struct InFlightRegistry {
    inner: Arc<Mutex<HashMap<BuildId, LiveBuild>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, live: LiveBuild) {
        self.inner.lock().insert(live.record.id, live);
    }

    /// Remove a build. Called by the executor after the terminal record is
    /// durable and before the completion event is emitted.
    pub fn remove(&self, id: BuildId) -> Option<LiveBuild> {
        self.inner.lock().remove(&id)
    }

    /// Clone of the live handle; the sink is shared, so output read through
    /// it stays current.
    pub fn get(&self, id: BuildId) -> Option<LiveBuild> {
        self.inner.lock().get(&id).cloned()
    }

    pub fn ids(&self) -> Vec<BuildId> {
        let mut ids: Vec<BuildId> = self.inner.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
