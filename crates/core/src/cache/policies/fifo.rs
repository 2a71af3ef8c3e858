//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Blocks are evicted in arrival order regardless of how recently they were hit.
//! Arrival order is exactly the set ordering, since insertion always happens at
//! the top and eviction at the bottom, so a hit has nothing to update.
//!
//! # Performance
//!
//! - **Time Complexity:** `on_hit()` is O(1)
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::ReplacementPolicy;
use crate::cache::set::CacheSet;
use crate::config::ReplacementPolicy as PolicyType;

/// FIFO policy. Stateless; arrival order lives in the set ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn on_hit(&self, _set: &mut CacheSet, _slot: usize) {}

    fn kind(&self) -> PolicyType {
        PolicyType::Fifo
    }
}
