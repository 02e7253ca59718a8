// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key→bytes blob cache abstraction.
//!
//! The engine assumes the cache serializes operations per key but makes no
//! assumption of cross-key atomicity; the record store's write-then-delete
//! lifecycle is built on that contract.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors from blob cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid cache key: {0:?}")]
    InvalidKey(String),
}

/// Durable key→bytes store.
///
/// Keys are `<prefix>/<name>` pairs. Mutations are durable before the
/// future resolves.
#[async_trait]
pub trait BlobCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError>;
    /// Remove a key. Removing an absent key is not an error.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;
    /// All keys under `<prefix>/`, in unspecified order.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, CacheError>;
}

/// In-memory cache.
///
/// Cloned handles share one map, so a "restarted" engine given a clone of
/// the same cache observes everything the previous instance persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl BlobCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        let want = format!("{}/", prefix);
        Ok(self
            .entries
            .lock()
            .keys()
            .filter(|k| k.starts_with(&want))
            .cloned()
            .collect())
    }
}

/// Filesystem cache: one file per key, prefix directories under a root.
///
/// Writes go through a temp file followed by a rename so a crash never
/// leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FsCache {
    root: PathBuf,
}

impl FsCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Split a `<prefix>/<name>` key and reject anything that could escape
    /// the cache root.
    fn key_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        let (prefix, name) = key
            .split_once('/')
            .ok_or_else(|| CacheError::InvalidKey(key.to_string()))?;
        if prefix.is_empty()
            || name.is_empty()
            || name.contains('/')
            || prefix == ".."
            || name == ".."
        {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(prefix).join(name))
    }
}

#[async_trait]
impl BlobCache for FsCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.key_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, &value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let path = self.key_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        let dir = self.root.join(prefix);
        let mut out = Vec::new();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            // Skip in-progress temp files from interrupted writes.
            if name.ends_with(".tmp") {
                continue;
            }
            out.push(format!("{}/{}", prefix, name));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
