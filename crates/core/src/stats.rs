//! Cache statistics collection.
//!
//! This module tracks the counters a replay produces. It provides:
//! 1. **Outcome Counters:** Hits and misses.
//! 2. **Memory Traffic:** Reads from and writes to backing memory.
//! 3. **Access Mix:** Read and write accesses, evictions and dirty evictions.
//! 4. **Derived Metrics:** Miss and hit ratios.
//!
//! All counters only ever increase during a run.

use serde::Serialize;

use crate::common::data::AccessType;

/// Counters accumulated by a [`Cache`](crate::cache::Cache).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to install their block.
    pub misses: u64,
    /// Blocks fetched from backing memory.
    pub mem_reads: u64,
    /// Writes propagated to backing memory (write-through writes and dirty flushes).
    pub mem_writes: u64,

    /// Read accesses seen.
    pub reads: u64,
    /// Write accesses seen.
    pub writes: u64,
    /// Blocks displaced from full sets.
    pub evictions: u64,
    /// Evicted blocks that were dirty and flushed to memory.
    pub dirty_evictions: u64,
}

impl CacheStats {
    /// Total accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// `misses / (hits + misses)`, or `None` when no access has been made.
    ///
    /// A ratio over zero accesses is undefined; it is reported as such rather
    /// than as zero or NaN.
    pub fn miss_ratio(&self) -> Option<f64> {
        match self.accesses() {
            0 => None,
            total => Some(self.misses as f64 / total as f64),
        }
    }

    /// `hits / (hits + misses)`, or `None` when no access has been made.
    pub fn hit_ratio(&self) -> Option<f64> {
        self.miss_ratio().map(|ratio| 1.0 - ratio)
    }

    /// Counts an access of type `op`.
    pub(crate) const fn record_access(&mut self, op: AccessType) {
        match op {
            AccessType::Read => self.reads += 1,
            AccessType::Write => self.writes += 1,
        }
    }
}
