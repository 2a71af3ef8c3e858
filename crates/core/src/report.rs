//! Simulation reports.
//!
//! Renders the final state of a replay. It provides:
//! 1. **Set dump:** Every slot of every set, bottom to top, as `state, tag` pairs.
//! 2. **Summary:** Configuration, memory traffic and hit/miss counters.
//! 3. **Condensed summary:** Miss ratio, memory writes and memory reads.
//! 4. **JSON:** The same data as a serde document.
//!
//! Slot states are printed as `-1` (empty), `0` (clean) and `1` (dirty); tags in
//! lowercase hex. An undefined miss ratio prints as `undefined` (text) or `null` (JSON).

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::cache::Cache;
use crate::cache::set::Block;
use crate::common::constants::BLOCK_SIZE;
use crate::common::error::SimError;
use crate::config::CacheConfig;
use crate::sim::simulator::{ReplaySummary, Simulator};
use crate::sim::sweep::SweepResult;
use crate::stats::CacheStats;

/// Display adapter for a possibly undefined ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ratio(pub Option<f64>);

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ratio) => write!(f, "{ratio:.6}"),
            None => write!(f, "undefined"),
        }
    }
}

/// Writes every set's slots, bottom to top.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_set_dump<W: Write>(cache: &Cache, out: &mut W) -> io::Result<()> {
    for (index, set) in cache.sets().iter().enumerate() {
        write!(out, "set #{index}:\t bottom <\t")?;
        for block in set.blocks() {
            write!(out, "{}, {:x}\t", block.state, block.tag)?;
        }
        writeln!(out, "> top")?;
    }
    Ok(())
}

/// Writes the configuration and counter summary.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_summary<W: Write>(cache: &Cache, out: &mut W) -> io::Result<()> {
    let config = cache.config();
    let stats = cache.stats();
    writeln!(out)?;
    writeln!(out, "cache size:\t{}", config.size_bytes)?;
    writeln!(out, "num of sets:\t{}", cache.num_sets())?;
    writeln!(out, "cache blocks per set:\t{BLOCK_SIZE}")?;
    writeln!(out, "associativity:\t{}", config.ways)?;
    writeln!(out, "fifo?:\t\t{}", config.policy.flag())?;
    writeln!(out, "write-back?:\t{}", config.write_policy.flag())?;
    writeln!(out, "mem writes:\t{}", stats.mem_writes)?;
    writeln!(out, "mem reads:\t{}", stats.mem_reads)?;
    writeln!(out, "miss counter:\t{}", stats.misses)?;
    writeln!(out, "hit counter\t{}", stats.hits)?;
    writeln!(out, "miss ratio:\t{}", Ratio(stats.miss_ratio()))?;
    Ok(())
}

/// Writes the three-line condensed summary.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_condensed<W: Write>(stats: &CacheStats, out: &mut W) -> io::Result<()> {
    writeln!(out, "Miss ratio {}", Ratio(stats.miss_ratio()))?;
    writeln!(out, "write {}", stats.mem_writes)?;
    writeln!(out, "read {}", stats.mem_reads)?;
    Ok(())
}

/// Writes the full text report: optional set dump, summary, condensed summary.
///
/// A note on skipped records is added only when the replay skipped any.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_text_report<W: Write>(sim: &Simulator, dump: bool, out: &mut W) -> io::Result<()> {
    let cache = sim.cache();
    if dump {
        write_set_dump(cache, out)?;
    }
    write_summary(cache, out)?;
    let skipped = sim.summary().skipped;
    if skipped > 0 {
        writeln!(out, "skipped records:\t{skipped}")?;
    }
    write_condensed(cache.stats(), out)
}

/// Writes one line per sweep configuration.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_sweep<W: Write>(results: &[SweepResult], out: &mut W) -> io::Result<()> {
    writeln!(out, "size\tways\tpolicy\twrite\thits\tmisses\treads\twrites\tmiss ratio")?;
    for result in results {
        let CacheConfig {
            size_bytes,
            ways,
            policy,
            write_policy,
        } = result.config;
        let stats = &result.stats;
        writeln!(
            out,
            "{size_bytes}\t{ways}\t{policy}\t{write_policy}\t{}\t{}\t{}\t{}\t{}",
            stats.hits,
            stats.misses,
            stats.mem_reads,
            stats.mem_writes,
            Ratio(result.miss_ratio)
        )?;
    }
    Ok(())
}

/// Serializable report of a finished replay.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Cache configuration.
    pub config: &'a CacheConfig,
    /// Derived number of sets.
    pub num_sets: usize,
    /// Fixed block size in bytes.
    pub block_size: usize,
    /// Final counters.
    pub stats: &'a CacheStats,
    /// Miss ratio, `null` when no accesses occurred.
    pub miss_ratio: Option<f64>,
    /// Record counts.
    pub replay: ReplaySummary,
    /// Every set's slots bottom to top, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<Vec<&'a [Block]>>,
}

impl<'a> Report<'a> {
    /// Builds a report from a finished simulator.
    pub fn new(sim: &'a Simulator, include_sets: bool) -> Self {
        let cache = sim.cache();
        let stats = cache.stats();
        Self {
            config: cache.config(),
            num_sets: cache.num_sets(),
            block_size: BLOCK_SIZE,
            stats,
            miss_ratio: stats.miss_ratio(),
            replay: sim.summary(),
            sets: include_sets.then(|| cache.sets().iter().map(|set| set.blocks()).collect()),
        }
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Renders sweep results as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SimError::Json`] if serialization fails.
pub fn sweep_to_json(results: &[SweepResult]) -> Result<String, SimError> {
    Ok(serde_json::to_string_pretty(results)?)
}
