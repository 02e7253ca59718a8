// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn memory_cache_round_trip() {
    let cache = MemoryCache::new();

    cache.put("queued/1", b"one".to_vec()).await.unwrap();
    assert_eq!(cache.get("queued/1").await.unwrap(), Some(b"one".to_vec()));
    assert_eq!(cache.get("queued/2").await.unwrap(), None);

    cache.invalidate("queued/1").await.unwrap();
    assert_eq!(cache.get("queued/1").await.unwrap(), None);
}

#[tokio::test]
async fn memory_cache_clones_share_entries() {
    let cache = MemoryCache::new();
    let other = cache.clone();

    cache.put("result/9", b"nine".to_vec()).await.unwrap();
    assert_eq!(other.get("result/9").await.unwrap(), Some(b"nine".to_vec()));
}

#[tokio::test]
async fn memory_cache_keys_filter_by_prefix() {
    let cache = MemoryCache::new();
    cache.put("queued/1", vec![]).await.unwrap();
    cache.put("queued/2", vec![]).await.unwrap();
    cache.put("result/1", vec![]).await.unwrap();

    let mut keys = cache.keys("queued").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["queued/1", "queued/2"]);
}

#[tokio::test]
async fn fs_cache_round_trip() {
    let dir = tempdir().unwrap();
    let cache = FsCache::new(dir.path());

    cache.put("queued/5", b"five".to_vec()).await.unwrap();
    assert_eq!(cache.get("queued/5").await.unwrap(), Some(b"five".to_vec()));

    cache.invalidate("queued/5").await.unwrap();
    assert_eq!(cache.get("queued/5").await.unwrap(), None);
    // Invalidating an absent key is not an error.
    cache.invalidate("queued/5").await.unwrap();
}

#[tokio::test]
async fn fs_cache_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let cache = FsCache::new(dir.path());
        cache.put("result/3", b"three".to_vec()).await.unwrap();
    }

    let cache = FsCache::new(dir.path());
    assert_eq!(cache.get("result/3").await.unwrap(), Some(b"three".to_vec()));
    assert_eq!(cache.keys("result").await.unwrap(), vec!["result/3"]);
}

#[tokio::test]
async fn fs_cache_keys_on_missing_prefix_is_empty() {
    let dir = tempdir().unwrap();
    let cache = FsCache::new(dir.path());
    assert!(cache.keys("queued").await.unwrap().is_empty());
}

#[tokio::test]
async fn fs_cache_rejects_traversal_keys() {
    let dir = tempdir().unwrap();
    let cache = FsCache::new(dir.path());

    assert!(cache.put("no-slash", vec![]).await.is_err());
    assert!(cache.put("../escape", vec![]).await.is_err());
    assert!(cache.put("queued/..", vec![]).await.is_err());
    assert!(cache.put("queued/a/b", vec![]).await.is_err());
}
