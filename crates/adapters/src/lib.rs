// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! peasant-adapters: External-system adapters for the peasant build queue
//!
//! Each collaborator the engine depends on is an `async_trait` seam with a
//! local default implementation: git-CLI workspace provisioning, the
//! source-hosting client, HTTP script download, and child-process
//! execution.

pub mod credentials;
pub mod fetch;
pub mod git;
pub mod host;
pub mod process;
pub mod subprocess;

pub use credentials::Credentials;
pub use fetch::{FetchError, HttpScriptFetcher, ScriptFetcher};
pub use git::{GitWorkspaceProvisioner, ProvisionError, WorkspaceProvisioner};
pub use host::{HostError, RepoHost, StaticRepoHost};
pub use process::{LaunchError, LaunchSpec, LocalProcessRunner, ProcessRunner};
