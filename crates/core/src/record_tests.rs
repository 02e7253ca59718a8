// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support;

#[test]
fn queued_record_copies_request_fields() {
    let req = test_support::build_request();
    let record = BuildRecord::queued(BuildId(7), &req);

    assert_eq!(record.id, BuildId(7));
    assert_eq!(record.repo_url, req.repo_url);
    assert_eq!(record.commit, req.commit);
    assert_eq!(record.build_script_url, req.build_script_url);
    assert!(record.output.is_empty());
    assert_eq!(record.exit_code, None);
    assert!(!record.is_terminal());
}

#[test]
fn succeeded_iff_exit_code_zero() {
    let mut record = test_support::queued_record(1);
    assert!(!record.succeeded());

    record.exit_code = Some(0);
    assert!(record.succeeded());

    record.exit_code = Some(1);
    assert!(!record.succeeded());

    record.exit_code = Some(-1);
    assert!(!record.succeeded());
}

#[test]
fn serialization_discriminates_exit_code_presence() {
    let queued = test_support::queued_record(3);
    let json = serde_json::to_string(&queued).unwrap();
    assert!(!json.contains("exit_code"));

    let result = test_support::result_record(3, "done\n", 0);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"exit_code\":0"));

    let back: BuildRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn workspace_override_is_not_part_of_the_record() {
    // The override lives on the request only; a record round-tripped
    // through JSON carries no trace of it.
    let req = test_support::build_request().workspace_root("/tmp/elsewhere");
    let record = BuildRecord::queued(BuildId(9), &req);
    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("elsewhere"));
}

#[test]
fn build_id_display_and_order() {
    assert_eq!(BuildId(42).to_string(), "42");
    assert!(BuildId(2) < BuildId(10));
}
