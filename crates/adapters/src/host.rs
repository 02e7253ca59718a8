// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source-hosting client capability.
//!
//! The engine needs three things from the host: the caller's own login,
//! clone credentials, and an existence/accessibility check used by the
//! build-script URL gate.

use crate::credentials::Credentials;
use async_trait::async_trait;
use peasant_core::RepoSlug;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from the source-hosting client.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host request failed: {0}")]
    Request(String),
}

/// Client for the source-hosting service.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Login of the account this queue runs as.
    fn login(&self) -> &str;

    /// Credentials to use when cloning.
    fn credentials(&self) -> Credentials;

    /// Does `slug` name a repository this account can read?
    async fn repo_exists(&self, slug: &RepoSlug) -> Result<bool, HostError>;
}

/// A host client configured with a fixed set of reachable repositories.
///
/// Suitable for deployments with a known repository inventory, and as the
/// standard host in tests.
#[derive(Debug, Clone)]
pub struct StaticRepoHost {
    login: String,
    credentials: Credentials,
    repos: HashSet<String>,
}

impl StaticRepoHost {
    pub fn new(login: impl Into<String>, credentials: Credentials) -> Self {
        Self { login: login.into(), credentials, repos: HashSet::new() }
    }

    /// Register `owner/name` as an accessible repository.
    pub fn with_repo(mut self, slug: &RepoSlug) -> Self {
        self.repos.insert(slug.to_string().to_ascii_lowercase());
        self
    }
}

#[async_trait]
impl RepoHost for StaticRepoHost {
    fn login(&self) -> &str {
        &self.login
    }

    fn credentials(&self) -> Credentials {
        self.credentials.clone()
    }

    async fn repo_exists(&self, slug: &RepoSlug) -> Result<bool, HostError> {
        Ok(self.repos.contains(&slug.to_string().to_ascii_lowercase()))
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
