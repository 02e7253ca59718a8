// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[tokio::test]
async fn captures_output_of_fast_command() {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg("echo hello");

    let output = run_with_timeout(cmd, Duration::from_secs(5), "echo").await.unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    let cmd = Command::new("definitely-not-a-real-program-xyz");
    let err = run_with_timeout(cmd, Duration::from_secs(5), "missing").await.unwrap_err();
    assert!(matches!(err, SubprocessError::Spawn { .. }));
}

#[tokio::test]
async fn slow_command_times_out() {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg("sleep 30");

    let err = run_with_timeout(cmd, Duration::from_millis(50), "sleep").await.unwrap_err();
    assert!(matches!(err, SubprocessError::Timeout { .. }));
}
