//! Set-Associative Cache Model.
//!
//! This module implements a single-level set-associative cache that tracks tags and
//! dirty state only. It models hits, misses, evictions and the memory traffic
//! implied by the configured write policy.
//!
//! # Accounting
//!
//! | Access          | Write-through          | Write-back                     |
//! |-----------------|------------------------|--------------------------------|
//! | read hit        | -                      | -                              |
//! | write hit       | 1 memory write         | block marked dirty             |
//! | read miss       | 1 memory read          | 1 memory read                  |
//! | write miss      | 1 memory write         | -                              |
//! | dirty eviction  | (never dirty)          | 1 memory write                 |

/// Cache replacement policy implementations (LRU, FIFO).
pub mod policies;

/// Cache sets and block slots.
pub mod set;

use tracing::{debug, trace};

use self::policies::ReplacementPolicy;
use self::set::{Block, CacheSet};
use crate::common::addr::{AddressDecoder, DecodedAddr};
use crate::common::data::AccessType;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, WritePolicy};
use crate::stats::CacheStats;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit,
    /// The block was installed; `victim` is the block evicted to make room, if any.
    Miss {
        /// Block displaced from the bottom of a full set.
        victim: Option<Block>,
    },
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    #[inline]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` for [`AccessOutcome::Miss`].
    #[inline]
    pub const fn is_miss(&self) -> bool {
        !self.is_hit()
    }

    /// The evicted block, if this access caused an eviction.
    pub const fn victim(&self) -> Option<Block> {
        match self {
            Self::Hit => None,
            Self::Miss { victim } => *victim,
        }
    }
}

/// Set-associative cache with a configurable replacement and write policy.
///
/// Storage for every set is allocated once in [`Cache::new`] and never resized.
#[derive(Debug)]
pub struct Cache {
    config: CacheConfig,
    decoder: AddressDecoder,
    sets: Vec<CacheSet>,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl Cache {
    /// Creates an empty cache for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not describe a valid
    /// geometry (see [`CacheConfig::validate`]). No storage is allocated in that case.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        let decoder = config.validate()?;
        let sets = (0..decoder.num_sets())
            .map(|_| CacheSet::new(config.ways))
            .collect();
        debug!(
            size = config.size_bytes,
            ways = config.ways,
            sets = decoder.num_sets(),
            policy = %config.policy,
            write_policy = %config.write_policy,
            "cache constructed"
        );
        Ok(Self {
            config,
            decoder,
            sets,
            policy: policies::build(config.policy),
            stats: CacheStats::default(),
        })
    }

    /// The configuration this cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The address decoder for this cache's geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.decoder.num_sets()
    }

    /// Running counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Every set, in index order.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// The set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Checks whether the block containing `address` is resident.
    ///
    /// Does not touch counters or replacement state.
    pub fn contains(&self, address: u64) -> bool {
        let DecodedAddr { tag, index, .. } = self.decoder.decompose(address);
        self.sets.get(index).is_some_and(|set| set.contains(tag))
    }

    /// Reads `address`.
    pub fn read(&mut self, address: u64) -> AccessOutcome {
        self.access(AccessType::Read, address)
    }

    /// Writes `address`.
    pub fn write(&mut self, address: u64) -> AccessOutcome {
        self.access(AccessType::Write, address)
    }

    /// Performs one access, updating the selected set and the counters.
    ///
    /// # Arguments
    ///
    /// * `op` - Read or write.
    /// * `address` - Byte address; any 64-bit value is accepted.
    ///
    /// # Panics
    ///
    /// This function will not panic. The set index is masked to `num_sets - 1`
    /// and `sets` holds exactly `num_sets` entries.
    pub fn access(&mut self, op: AccessType, address: u64) -> AccessOutcome {
        let DecodedAddr { tag, index, .. } = self.decoder.decompose(address);
        let write_policy = self.config.write_policy;
        self.stats.record_access(op);

        let set = &mut self.sets[index];

        if let Some(slot) = set.find(tag) {
            if op.is_write() {
                match write_policy {
                    WritePolicy::WriteThrough => self.stats.mem_writes += 1,
                    WritePolicy::WriteBack => set.mark_dirty(slot),
                }
            }
            self.policy.on_hit(set, slot);
            self.stats.hits += 1;
            trace!(%op, address, index, tag, "hit");
            return AccessOutcome::Hit;
        }

        let victim = set.insert(tag);
        if let Some(evicted) = victim {
            self.stats.evictions += 1;
            if write_policy == WritePolicy::WriteBack && evicted.is_dirty() {
                self.stats.mem_writes += 1;
                self.stats.dirty_evictions += 1;
                debug!(index, tag = evicted.tag, "dirty block flushed on eviction");
            } else {
                debug!(index, tag = evicted.tag, "clean block evicted");
            }
        }

        match (op, write_policy) {
            (AccessType::Read, _) => self.stats.mem_reads += 1,
            (AccessType::Write, WritePolicy::WriteThrough) => self.stats.mem_writes += 1,
            (AccessType::Write, WritePolicy::WriteBack) => {}
        }
        self.stats.misses += 1;
        trace!(%op, address, index, tag, "miss");

        AccessOutcome::Miss { victim }
    }
}
