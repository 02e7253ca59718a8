// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! peasant-storage: Durable record storage for the peasant build queue
//!
//! A [`RecordStore`] facade over a key→bytes [`BlobCache`] gives each build
//! a two-key lifecycle: `queued/<id>` while pending, `result/<id>` once
//! terminal.

pub mod cache;
pub mod records;

pub use cache::{BlobCache, CacheError, FsCache, MemoryCache};
pub use records::{RecordStore, StoreError};
