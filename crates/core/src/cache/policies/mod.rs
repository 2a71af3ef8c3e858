//! Cache Replacement Policies.
//!
//! Every set keeps its blocks in one ordered sequence and always evicts from the
//! bottom (position 0). A replacement policy therefore only decides what a hit
//! does to that order.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used. Hits promote the block to the top.
//! - `Fifo`: First-In, First-Out. Hits leave the order untouched.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

use std::fmt::Debug;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::set::CacheSet;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines how a hit updates the ordering of a set. Victim selection is shared
/// by all policies: the bottom slot of a full set is evicted.
pub trait ReplacementPolicy: Debug + Send + Sync {
    /// Updates the set ordering after a hit.
    ///
    /// # Arguments
    ///
    /// * `set` - The set that was hit.
    /// * `slot` - Position of the hit block within the set.
    fn on_hit(&self, set: &mut CacheSet, slot: usize);

    /// The configuration value this policy implements.
    fn kind(&self) -> PolicyType;
}

/// Builds the policy implementation for a configured policy type.
pub fn build(kind: PolicyType) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
    }
}
