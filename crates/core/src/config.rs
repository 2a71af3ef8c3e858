//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! a cache. It provides:
//! 1. **Defaults:** Baseline geometry used when a field is omitted.
//! 2. **Enums:** Replacement and write policies, parsed from CLI flags or JSON.
//! 3. **Validation:** Derivation of the set count and rejection of impossible geometries.
//!
//! Configuration is supplied as positional CLI values or as JSON (sweep files).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::addr::AddressDecoder;
use crate::common::constants::BLOCK_SIZE;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (32 KiB).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Default cache associativity (4 ways).
    pub const CACHE_WAYS: usize = 4;
}

/// Cache replacement policy algorithms.
///
/// Both policies share one ordered set structure with eviction at the bottom;
/// they differ only in whether a hit reorders the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// A hit promotes the block to the top of its set.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Hits leave the set untouched; only insertion order matters.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
}

impl ReplacementPolicy {
    /// Numeric flag used on the command line and in reports (`0` = LRU, `1` = FIFO).
    pub const fn flag(self) -> u8 {
        match self {
            Self::Lru => 0,
            Self::Fifo => 1,
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "lru" => Ok(Self::Lru),
            "1" | "fifo" => Ok(Self::Fifo),
            _ => Err(ConfigError::InvalidPolicy {
                kind: "replacement",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => write!(f, "LRU"),
            Self::Fifo => write!(f, "FIFO"),
        }
    }
}

/// Cache write policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Writes only mark the block dirty; memory is written when a dirty block is evicted.
    #[default]
    #[serde(alias = "WriteBack", alias = "wb")]
    WriteBack,
    /// Every write is propagated to memory immediately; blocks never become dirty.
    #[serde(alias = "WriteThrough", alias = "wt")]
    WriteThrough,
}

impl WritePolicy {
    /// Numeric flag used on the command line and in reports (`0` = write-through, `1` = write-back).
    pub const fn flag(self) -> u8 {
        match self {
            Self::WriteThrough => 0,
            Self::WriteBack => 1,
        }
    }
}

impl FromStr for WritePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "wt" | "write-through" | "writethrough" => Ok(Self::WriteThrough),
            "1" | "wb" | "write-back" | "writeback" => Ok(Self::WriteBack),
            _ => Err(ConfigError::InvalidPolicy {
                kind: "write",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteBack => write!(f, "write-back"),
            Self::WriteThrough => write!(f, "write-through"),
        }
    }
}

/// Configuration of a single cache.
///
/// The block size is fixed at [`BLOCK_SIZE`]; everything else is chosen per run.
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};
///
/// let json = r#"{ "size_bytes": 8192, "ways": 2, "policy": "FIFO" }"#;
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.write_policy, WritePolicy::WriteBack);
/// assert_eq!(config.validate().unwrap().num_sets(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Associativity (number of blocks per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Write policy
    #[serde(default)]
    pub write_policy: WritePolicy,
}

impl CacheConfig {
    /// Builds a configuration from its four values without validating it.
    pub const fn new(
        size_bytes: usize,
        ways: usize,
        policy: ReplacementPolicy,
        write_policy: WritePolicy,
    ) -> Self {
        Self {
            size_bytes,
            ways,
            policy,
            write_policy,
        }
    }

    /// Returns the default cache size in bytes.
    const fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache associativity.
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Checks the geometry and derives the address decoder for it.
    ///
    /// `num_sets = size_bytes / (BLOCK_SIZE * ways)` must be exact and a positive
    /// power of two.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, in the order: zero size, zero
    /// associativity, uneven division, non-power-of-two set count.
    pub fn validate(&self) -> Result<AddressDecoder, ConfigError> {
        if self.size_bytes == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        let not_divisible = ConfigError::NotDivisible {
            size: self.size_bytes,
            block_size: BLOCK_SIZE,
            ways: self.ways,
        };
        let Some(set_bytes) = BLOCK_SIZE.checked_mul(self.ways) else {
            return Err(not_divisible);
        };
        if self.size_bytes % set_bytes != 0 {
            return Err(not_divisible);
        }
        AddressDecoder::new(self.size_bytes / set_bytes)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
        }
    }
}
