//! # Write Policy Tests
//!
//! Memory traffic accounting under write-back and write-through.
//!
//! | Access         | Write-through | Write-back      |
//! |----------------|---------------|-----------------|
//! | write hit      | +1 mem write  | block dirty     |
//! | write miss     | +1 mem write  | installed clean |
//! | read miss      | +1 mem read   | +1 mem read     |
//! | dirty eviction | n/a           | +1 mem write    |

use cachesim_core::cache::set::BlockState;
use cachesim_core::config::{ReplacementPolicy, WritePolicy};
use cachesim_core::{Cache, CacheStats};
use pretty_assertions::assert_eq;

use crate::common::cache;

const WB: WritePolicy = WritePolicy::WriteBack;
const WT: WritePolicy = WritePolicy::WriteThrough;

fn state_of(c: &Cache, address: u64) -> Option<BlockState> {
    let fields = c.decoder().decompose(address);
    c.set(fields.index)?
        .occupied()
        .iter()
        .find(|b| b.tag == fields.tag)
        .map(|b| b.state)
}

/// Direct-mapped, one set: `W 0x0, W 0x0, R 0x40`.
fn write_write_evict(policy: WritePolicy) -> Cache {
    let mut c = cache(64, 1, ReplacementPolicy::Lru, policy);
    let _ = c.write(0x0);
    let _ = c.write(0x0);
    let _ = c.read(0x40);
    c
}

// ══════════════════════════════════════════════════════════
// 1. Write-back
// ══════════════════════════════════════════════════════════

#[test]
fn write_back_miss_installs_clean_without_traffic() {
    let mut c = cache(1024, 2, ReplacementPolicy::Lru, WB);
    assert!(c.write(0x100).is_miss());
    assert_eq!(state_of(&c, 0x100), Some(BlockState::Clean));
    assert_eq!((c.stats().mem_reads, c.stats().mem_writes), (0, 0));
}

#[test]
fn write_back_hit_marks_dirty() {
    let mut c = cache(1024, 2, ReplacementPolicy::Lru, WB);
    let _ = c.read(0x100);
    assert!(c.write(0x108).is_hit());
    assert_eq!(state_of(&c, 0x100), Some(BlockState::Dirty));
    assert_eq!(c.stats().mem_writes, 0);
}

#[test]
fn write_back_flushes_dirty_victim_once() {
    let c = write_write_evict(WB);
    assert_eq!(
        *c.stats(),
        CacheStats {
            hits: 1,
            misses: 2,
            mem_reads: 1,
            mem_writes: 1,
            reads: 1,
            writes: 2,
            evictions: 1,
            dirty_evictions: 1,
        }
    );
}

#[test]
fn write_back_clean_eviction_is_free() {
    let mut c = cache(64, 1, ReplacementPolicy::Fifo, WB);
    let _ = c.read(0x0);
    let victim = c.read(0x40).victim();
    assert_eq!(victim.map(|b| b.is_dirty()), Some(false));
    assert_eq!(c.stats().mem_writes, 0);
    assert_eq!(c.stats().mem_reads, 2);
}

#[test]
fn repeated_writes_flush_once() {
    let mut c = cache(64, 1, ReplacementPolicy::Lru, WB);
    let _ = c.read(0x0);
    for _ in 0..10 {
        let _ = c.write(0x0);
    }
    assert_eq!(c.stats().mem_writes, 0);
    let _ = c.read(0x40);
    assert_eq!(c.stats().mem_writes, 1);
}

// ══════════════════════════════════════════════════════════
// 2. Write-through
// ══════════════════════════════════════════════════════════

#[test]
fn write_through_counts_every_write() {
    let c = write_write_evict(WT);
    assert_eq!(
        *c.stats(),
        CacheStats {
            hits: 1,
            misses: 2,
            mem_reads: 1,
            mem_writes: 2,
            reads: 1,
            writes: 2,
            evictions: 1,
            dirty_evictions: 0,
        }
    );
}

#[test]
fn write_through_never_dirty() {
    let mut c = cache(1024, 2, ReplacementPolicy::Lru, WT);
    for i in 0..64u64 {
        let _ = c.write(i * 24);
    }
    assert!(
        c.sets()
            .iter()
            .flat_map(|s| s.blocks())
            .all(|b| b.state != BlockState::Dirty)
    );
    assert_eq!(c.stats().mem_writes, 64);
}

#[test]
fn write_through_miss_installs_block() {
    let mut c = cache(1024, 2, ReplacementPolicy::Fifo, WT);
    assert!(c.write(0x300).is_miss());
    assert!(c.read(0x300).is_hit());
    assert_eq!(c.stats().mem_reads, 0);
}

#[test]
fn read_misses_cost_the_same_under_both_policies() {
    for policy in [WB, WT] {
        let mut c = cache(1024, 2, ReplacementPolicy::Lru, policy);
        for block in 0..100u64 {
            let _ = c.read(block * 64);
        }
        assert_eq!(c.stats().mem_reads, 100);
        assert_eq!(c.stats().mem_writes, 0);
    }
}
