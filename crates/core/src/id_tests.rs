// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;

#[test]
fn empty_store_starts_at_one() {
    let ids = IdAllocator::seeded(0);
    assert_eq!(ids.allocate(), BuildId(1));
    assert_eq!(ids.allocate(), BuildId(2));
}

#[test]
fn seeded_allocator_continues_after_max() {
    let ids = IdAllocator::seeded(7);
    assert_eq!(ids.allocate(), BuildId(8));
    assert_eq!(ids.allocate(), BuildId(9));
}

#[test]
fn concurrent_allocations_are_unique() {
    let ids = Arc::new(IdAllocator::seeded(0));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let ids = Arc::clone(&ids);
        handles.push(std::thread::spawn(move || {
            (0..100).map(|_| ids.allocate().as_u64()).collect::<Vec<_>>()
        }));
    }

    let mut all: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), 800);
    assert_eq!(*all.first().unwrap(), 1);
    assert_eq!(*all.last().unwrap(), 800);
}
