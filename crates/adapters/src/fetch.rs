// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-script download.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors from script download.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download failed: {0}")]
    Http(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability to download a build script by URL into the workspace.
#[async_trait]
pub trait ScriptFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

/// HTTP script fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpScriptFetcher {
    client: reqwest::Client,
}

impl HttpScriptFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScriptFetcher for HttpScriptFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::Http(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;
        tokio::fs::write(dest, &bytes).await?;
        tracing::info!(url, dest = %dest.display(), bytes = bytes.len(), "downloaded build script");
        Ok(())
    }
}
