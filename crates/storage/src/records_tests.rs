// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::cache::MemoryCache;
use peasant_core::test_support::{queued_record, result_record};

fn store() -> (RecordStore, MemoryCache) {
    let cache = MemoryCache::new();
    (RecordStore::new(Arc::new(cache.clone())), cache)
}

#[tokio::test]
async fn queued_round_trip() {
    let (store, _) = store();
    let record = queued_record(4);

    store.put_queued(&record).await.unwrap();
    assert_eq!(store.get_queued(BuildId(4)).await.unwrap(), Some(record));
    assert_eq!(store.get_result(BuildId(4)).await.unwrap(), None);
}

#[tokio::test]
async fn result_round_trip() {
    let (store, _) = store();
    let record = result_record(6, "built\n", 0);

    store.put_result(&record).await.unwrap();
    let back = store.get_result(BuildId(6)).await.unwrap().unwrap();
    assert_eq!(back.output, "built\n");
    assert_eq!(back.exit_code, Some(0));
    assert!(back.succeeded());
}

#[tokio::test]
async fn completion_transition_leaves_only_result() {
    let (store, cache) = store();
    let queued = queued_record(2);
    store.put_queued(&queued).await.unwrap();

    let result = result_record(2, "done\n", 0);
    store.put_result(&result).await.unwrap();
    store.invalidate_queued(BuildId(2)).await.unwrap();

    assert_eq!(store.get_queued(BuildId(2)).await.unwrap(), None);
    assert!(store.get_result(BuildId(2)).await.unwrap().is_some());
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn list_queued_sorts_by_id() {
    let (store, _) = store();
    for id in [7, 2, 5] {
        store.put_queued(&queued_record(id)).await.unwrap();
    }

    let ids: Vec<u64> = store
        .list_queued()
        .await
        .unwrap()
        .iter()
        .map(|r| r.id.as_u64())
        .collect();
    assert_eq!(ids, vec![2, 5, 7]);
}

#[tokio::test]
async fn max_id_scans_both_prefixes() {
    let (store, _) = store();
    assert_eq!(store.max_id().await.unwrap(), 0);

    store.put_queued(&queued_record(3)).await.unwrap();
    assert_eq!(store.max_id().await.unwrap(), 3);

    store.put_result(&result_record(11, "", 1)).await.unwrap();
    assert_eq!(store.max_id().await.unwrap(), 11);

    store.put_queued(&queued_record(5)).await.unwrap();
    assert_eq!(store.max_id().await.unwrap(), 11);
}

#[tokio::test]
async fn invalidate_queued_is_idempotent() {
    let (store, _) = store();
    store.put_queued(&queued_record(8)).await.unwrap();

    store.invalidate_queued(BuildId(8)).await.unwrap();
    store.invalidate_queued(BuildId(8)).await.unwrap();
    assert_eq!(store.get_queued(BuildId(8)).await.unwrap(), None);
}

#[tokio::test]
async fn foreign_keys_under_prefix_are_ignored() {
    let (store, cache) = store();
    cache.put("queued/not-a-number", b"{}".to_vec()).await.unwrap();
    store.put_queued(&queued_record(1)).await.unwrap();

    let records = store.list_queued().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(store.max_id().await.unwrap(), 1);
}
