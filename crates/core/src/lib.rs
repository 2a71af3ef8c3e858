//! Trace-driven cache simulator library.
//!
//! This crate replays a trace of memory reads and writes against a single-level
//! set-associative cache and reports hit/miss and memory-traffic statistics:
//! 1. **Cache:** Address decomposition, ordered sets, LRU/FIFO replacement and
//!    write-back/write-through accounting.
//! 2. **Trace:** Parsing `R`/`W` records and replaying them, singly or as a sweep.
//! 3. **Reporting:** Set dumps, text summaries and JSON reports.
//!
//! ```
//! use cachesim_core::{Cache, CacheConfig};
//! use cachesim_core::config::{ReplacementPolicy, WritePolicy};
//!
//! let config = CacheConfig::new(1024, 2, ReplacementPolicy::Lru, WritePolicy::WriteBack);
//! let mut cache = Cache::new(config).unwrap();
//! assert!(cache.read(0x1000).is_miss());
//! assert!(cache.read(0x1000).is_hit());
//! assert_eq!(cache.stats().miss_ratio(), Some(0.5));
//! ```

/// Set-associative cache model (sets, blocks, replacement policies).
pub mod cache;
/// Common types and constants (address decoding, access types, errors).
pub mod common;
/// Cache configuration (defaults, policy enums, validation).
pub mod config;
/// Text and JSON reports.
pub mod report;
/// Trace reading, replay and sweeps.
pub mod sim;
/// Cache statistics.
pub mod stats;

/// Cache model; construct with `Cache::new`.
pub use crate::cache::{AccessOutcome, Cache};
/// Access classification and error types.
pub use crate::common::{AccessType, ConfigError, SimError};
/// Cache configuration; use `CacheConfig::new` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Replay driver.
pub use crate::sim::Simulator;
/// Counters produced by a replay.
pub use crate::stats::CacheStats;
