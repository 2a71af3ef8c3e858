//! # Cache Lookup Tests
//!
//! Hit/miss classification, victim reporting, eviction from full sets and
//! isolation between sets.

use cachesim_core::AccessOutcome;
use cachesim_core::cache::set::{Block, BlockState};
use cachesim_core::config::{ReplacementPolicy, WritePolicy};
use pretty_assertions::assert_eq;

use crate::common::{addr, cache, set_tags};

const LRU: ReplacementPolicy = ReplacementPolicy::Lru;
const FIFO: ReplacementPolicy = ReplacementPolicy::Fifo;
const WB: WritePolicy = WritePolicy::WriteBack;

#[test]
fn cold_cache_is_empty() {
    let c = cache(1024, 2, LRU, WB);
    assert_eq!(c.num_sets(), 8);
    assert_eq!(c.sets().len(), 8);
    for set in c.sets() {
        assert_eq!(set.ways(), 2);
        assert!(set.blocks().iter().all(|b| b.state == BlockState::Empty));
    }
    assert_eq!(c.stats().accesses(), 0);
}

#[test]
fn first_access_misses_then_hits() {
    let mut c = cache(1024, 2, LRU, WB);
    assert_eq!(c.read(0x1000), AccessOutcome::Miss { victim: None });
    assert_eq!(c.read(0x1000), AccessOutcome::Hit);
    assert_eq!((c.stats().hits, c.stats().misses), (1, 1));
}

#[test]
fn any_byte_of_a_resident_block_hits() {
    let mut c = cache(1024, 2, LRU, WB);
    let _ = c.read(0x2000);
    assert!(c.read(0x2001).is_hit());
    assert!(c.write(0x203f).is_hit());
    assert!(c.read(0x2040).is_miss());
}

#[test]
fn contains_does_not_count() {
    let mut c = cache(1024, 2, LRU, WB);
    assert!(!c.contains(0x40));
    let _ = c.read(0x40);
    assert!(c.contains(0x7f));
    assert_eq!(c.stats().accesses(), 1);
}

#[test]
fn direct_mapped_conflict_evicts() {
    for policy in [LRU, FIFO] {
        let mut c = cache(256, 1, policy, WB);
        let dec = *c.decoder();
        let a = addr(&dec, 1, 2, 0);
        let b = addr(&dec, 5, 2, 8);

        assert!(c.read(a).is_miss());
        assert_eq!(c.read(b).victim(), Some(Block::clean(1)));
        assert!(c.read(a).is_miss());
        assert_eq!(c.stats().misses, 3);
        assert_eq!(c.stats().evictions, 2);
        assert_eq!(set_tags(&c, 2), vec![1]);
    }
}

#[test]
fn set_fills_before_evicting() {
    let mut c = cache(4 * 64 * 4, 4, LRU, WB);
    let dec = *c.decoder();
    for tag in 0..4 {
        assert_eq!(c.read(addr(&dec, tag, 3, 0)).victim(), None);
    }
    assert_eq!(set_tags(&c, 3), vec![0, 1, 2, 3]);
    assert_eq!(c.set(3).map(|s| s.is_full()), Some(true));

    let outcome = c.read(addr(&dec, 9, 3, 0));
    assert_eq!(outcome.victim().map(|b| b.tag), Some(0));
    assert_eq!(set_tags(&c, 3), vec![1, 2, 3, 9]);
}

#[test]
fn sets_are_independent() {
    let mut c = cache(512, 2, LRU, WB);
    let dec = *c.decoder();
    for tag in 0..10 {
        let _ = c.read(addr(&dec, tag, 0, 0));
    }
    let _ = c.read(addr(&dec, 42, 1, 0));
    assert_eq!(set_tags(&c, 0), vec![8, 9]);
    assert_eq!(set_tags(&c, 1), vec![42]);
    for index in 2..c.num_sets() {
        assert!(c.set(index).is_some_and(|s| s.is_empty()));
    }
}

#[test]
fn eviction_is_bottom_slot_only() {
    let mut c = cache(3 * 64, 3, FIFO, WB);
    assert!(c.read(0x0).is_miss());
    let _ = c.read(0x40);
    let _ = c.read(0x80);
    let victim = c.set(0).and_then(|s| s.victim().copied());
    assert_eq!(victim, Some(Block::clean(0)));
}

#[test]
fn out_of_range_set_lookup() {
    let c = cache(1024, 2, LRU, WB);
    assert!(c.set(c.num_sets()).is_none());
}
