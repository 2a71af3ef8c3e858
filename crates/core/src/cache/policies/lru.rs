//! Least Recently Used (LRU) Replacement Policy.
//!
//! The set ordering doubles as a usage stack. A hit rotates the accessed block to
//! the top of the occupied slots, so the bottom slot is always the block touched
//! least recently and is the one a full set evicts.
//!
//! # Performance
//!
//! - **Time Complexity:** `on_hit()` is O(W) where W is the associativity
//! - **Space Complexity:** none beyond the set itself
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::ReplacementPolicy;
use crate::cache::set::CacheSet;
use crate::config::ReplacementPolicy as PolicyType;

/// LRU policy. Stateless; recency lives in the set ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Promotes the hit block to the most-recently-used position.
    fn on_hit(&self, set: &mut CacheSet, slot: usize) {
        set.promote(slot);
    }

    fn kind(&self) -> PolicyType {
        PolicyType::Lru
    }
}
