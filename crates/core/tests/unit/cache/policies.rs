//! # Replacement Policy Tests
//!
//! LRU and FIFO share one ordered set; they differ only in what a hit does.
//! These tests pin down that difference directly on a [`CacheSet`] and
//! through a whole cache.

use cachesim_core::cache::policies::{self, FifoPolicy, LruPolicy, ReplacementPolicy};
use cachesim_core::cache::set::CacheSet;
use cachesim_core::config::{ReplacementPolicy as PolicyType, WritePolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{cache, set_tags};

fn filled(tags: &[u64], ways: usize) -> CacheSet {
    let mut set = CacheSet::new(ways);
    for &tag in tags {
        let _ = set.insert(tag);
    }
    set
}

fn tags(set: &CacheSet) -> Vec<u64> {
    set.occupied().iter().map(|b| b.tag).collect()
}

// ══════════════════════════════════════════════════════════
// 1. Policies in isolation
// ══════════════════════════════════════════════════════════

#[test]
fn lru_hit_moves_block_to_top() {
    let mut set = filled(&[1, 2, 3, 4], 4);
    LruPolicy.on_hit(&mut set, 1);
    assert_eq!(tags(&set), vec![1, 3, 4, 2]);
}

#[test]
fn lru_hit_on_top_is_noop() {
    let mut set = filled(&[1, 2, 3], 3);
    LruPolicy.on_hit(&mut set, 2);
    assert_eq!(tags(&set), vec![1, 2, 3]);
}

#[test]
fn lru_hit_in_partial_set_keeps_prefix_contiguous() {
    let mut set = filled(&[1, 2], 4);
    LruPolicy.on_hit(&mut set, 0);
    assert_eq!(tags(&set), vec![2, 1]);
    assert_eq!(set.len(), 2);
    assert!(set.blocks()[2..].iter().all(|b| !b.is_valid()));
}

#[test]
fn fifo_hit_leaves_order() {
    let mut set = filled(&[1, 2, 3, 4], 4);
    FifoPolicy.on_hit(&mut set, 0);
    assert_eq!(tags(&set), vec![1, 2, 3, 4]);
}

#[rstest]
#[case(PolicyType::Lru)]
#[case(PolicyType::Fifo)]
fn build_returns_matching_policy(#[case] kind: PolicyType) {
    assert_eq!(policies::build(kind).kind(), kind);
}

// ══════════════════════════════════════════════════════════
// 2. Through the cache
// ══════════════════════════════════════════════════════════

/// One set of two ways: `R 0x0, R 0x40, R 0x0, R 0x80`.
///
/// LRU evicts block 1 (least recently used); FIFO evicts block 0 (oldest).
#[rstest]
#[case(PolicyType::Lru, vec![0, 2])]
#[case(PolicyType::Fifo, vec![1, 2])]
fn policies_diverge_after_a_hit(#[case] kind: PolicyType, #[case] expected: Vec<u64>) {
    let mut c = cache(128, 2, kind, WritePolicy::WriteBack);
    assert_eq!(c.num_sets(), 1);
    let _ = c.read(0x0);
    let _ = c.read(0x40);
    assert!(c.read(0x0).is_hit());
    let victim = c.read(0x80).victim().map(|b| b.tag);

    assert_eq!(set_tags(&c, 0), expected);
    assert_eq!(victim, Some(if kind == PolicyType::Lru { 1 } else { 0 }));
    assert_eq!((c.stats().hits, c.stats().misses), (1, 3));
}

#[test]
fn lru_keeps_hot_block_resident() {
    let mut c = cache(4 * 64, 4, PolicyType::Lru, WritePolicy::WriteBack);
    let hot = 0x0;
    for block in 1..32u64 {
        let _ = c.read(hot);
        let _ = c.read(block * 64);
    }
    assert!(c.contains(hot));
    assert_eq!(c.stats().hits, 30);
}

#[test]
fn fifo_evicts_hot_block_in_turn() {
    let mut c = cache(4 * 64, 4, PolicyType::Fifo, WritePolicy::WriteBack);
    for block in 0..4u64 {
        let _ = c.read(block * 64);
    }
    assert!(c.read(0x0).is_hit());
    let outcome = c.read(4 * 64);
    assert_eq!(outcome.victim().map(|b| b.tag), Some(0));
    assert!(!c.contains(0x0));
}

#[test]
fn dirty_state_follows_promoted_block() {
    let mut c = cache(128, 2, PolicyType::Lru, WritePolicy::WriteBack);
    let _ = c.write(0x0);
    let _ = c.read(0x40);
    assert!(c.write(0x0).is_hit());
    let top = c.set(0).and_then(|s| s.occupied().last().copied());
    assert_eq!(top.map(|b| (b.tag, b.is_dirty())), Some((0, true)));
}
