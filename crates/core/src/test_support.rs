// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::record::{BuildId, BuildRecord, BuildRequest};

pub const TEST_REPO_URL: &str = "https://example.com/acme/widgets";
pub const TEST_COMMIT: &str = "0123456789abcdef0123456789abcdef01234567";
pub const TEST_SCRIPT_URL: &str = "https://example.com/acme/widgets/blob/master/build.cmd";

/// A request against the canonical test repository.
pub fn build_request() -> BuildRequest {
    BuildRequest::new(TEST_REPO_URL, TEST_COMMIT, TEST_SCRIPT_URL)
}

/// A queued-state record (no exit code) with the given id.
pub fn queued_record(id: u64) -> BuildRecord {
    BuildRecord::queued(BuildId(id), &build_request())
}

/// A terminal record with the given id, output, and exit code.
pub fn result_record(id: u64, output: &str, exit_code: i32) -> BuildRecord {
    let mut record = queued_record(id);
    record.output = output.to_string();
    record.exit_code = Some(exit_code);
    record
}
