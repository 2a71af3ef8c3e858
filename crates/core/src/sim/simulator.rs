//! Simulator: owns a cache and replays a trace through it.
//!
//! Replay is strictly sequential. Each record performs exactly one cache access;
//! malformed records are logged, counted and skipped without touching the cache.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::trace::{TraceReader, TraceRecord};
use crate::cache::{AccessOutcome, Cache};
use crate::common::error::SimError;
use crate::config::CacheConfig;

/// Record counts of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Well-formed records applied to the cache.
    pub records: u64,
    /// Malformed records skipped.
    pub skipped: u64,
}

/// Top-level simulator: the cache plus replay bookkeeping.
#[derive(Debug)]
pub struct Simulator {
    cache: Cache,
    summary: ReplaySummary,
}

impl Simulator {
    /// Creates a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the configuration is rejected.
    pub fn new(config: CacheConfig) -> Result<Self, SimError> {
        Ok(Self::from_cache(Cache::new(config)?))
    }

    /// Wraps an existing cache.
    pub const fn from_cache(cache: Cache) -> Self {
        Self {
            cache,
            summary: ReplaySummary {
                records: 0,
                skipped: 0,
            },
        }
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Consumes the simulator, returning the cache.
    pub fn into_cache(self) -> Cache {
        self.cache
    }

    /// Record counts accumulated so far.
    pub const fn summary(&self) -> ReplaySummary {
        self.summary
    }

    /// Applies a single record.
    pub fn step(&mut self, record: TraceRecord) -> AccessOutcome {
        self.summary.records += 1;
        self.cache.access(record.op, record.address)
    }

    /// Replays a stream of parsed records.
    ///
    /// Recoverable errors ([`SimError::MalformedRecord`]) are logged and skipped;
    /// any other error stops the replay and is returned.
    ///
    /// # Errors
    ///
    /// Returns the first non-recoverable error yielded by `records`.
    pub fn replay<I>(&mut self, records: I) -> Result<ReplaySummary, SimError>
    where
        I: IntoIterator<Item = Result<TraceRecord, SimError>>,
    {
        for item in records {
            match item {
                Ok(record) => {
                    let _ = self.step(record);
                }
                Err(err) if err.is_recoverable() => {
                    warn!("skipping {err}");
                    self.summary.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(self.summary)
    }

    /// Opens the trace at `path` and replays it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceUnavailable`] if the trace cannot be opened or read.
    pub fn replay_file(&mut self, path: impl AsRef<Path>) -> Result<ReplaySummary, SimError> {
        let path = path.as_ref();
        info!(trace = %path.display(), "replaying trace");
        let summary = self.replay(TraceReader::open(path)?)?;
        let stats = self.cache.stats();
        info!(
            records = summary.records,
            skipped = summary.skipped,
            hits = stats.hits,
            misses = stats.misses,
            "replay finished"
        );
        Ok(summary)
    }
}

/// Builds a cache for `config` and replays the trace at `path` through it.
///
/// The configuration is validated before the trace is opened, so an invalid
/// configuration never causes any trace I/O.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfig`] or [`SimError::TraceUnavailable`].
pub fn run(config: CacheConfig, path: impl AsRef<Path>) -> Result<Simulator, SimError> {
    let mut sim = Simulator::new(config)?;
    let _ = sim.replay_file(path)?;
    Ok(sim)
}
