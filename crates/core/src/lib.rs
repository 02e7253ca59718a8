// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! peasant-core: Core types for the peasant build queue

pub mod macros;

pub mod id;
pub mod record;
pub mod sink;
pub mod url;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use id::IdAllocator;
pub use record::{BuildId, BuildRecord, BuildRequest, DEFAULT_PRIORITY};
pub use sink::OutputSink;
pub use url::{raw_script_url, script_file_name, script_rel_path, workspace_dir_name, RepoSlug};
