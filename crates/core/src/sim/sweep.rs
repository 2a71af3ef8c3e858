//! Configuration sweeps.
//!
//! Replays one trace against several cache configurations to compare them. The
//! sweep description is JSON:
//!
//! ```json
//! { "configs": [
//!     { "size_bytes": 4096, "ways": 1 },
//!     { "size_bytes": 4096, "ways": 4, "policy": "FIFO", "write_policy": "write-through" }
//! ] }
//! ```
//!
//! Every configuration is validated before the trace is read. The trace is parsed
//! once and the same records are replayed against each configuration in order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::simulator::Simulator;
use super::trace::{TraceReader, TraceRecord};
use crate::common::error::SimError;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// A list of configurations to compare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SweepConfig {
    /// Configurations, replayed in this order.
    pub configs: Vec<CacheConfig>,
}

/// Outcome of replaying the trace against one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    /// The configuration replayed.
    pub config: CacheConfig,
    /// Final counters.
    pub stats: CacheStats,
    /// `stats.miss_ratio()`, or `None` for an empty trace.
    pub miss_ratio: Option<f64>,
    /// Malformed records skipped while reading the trace.
    pub skipped: u64,
}

impl SweepConfig {
    /// Parses a sweep description from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the JSON does not describe a sweep.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a sweep description file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigUnavailable`] if the file cannot be read, or
    /// [`SimError::Json`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SimError::ConfigUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks every configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for the first invalid configuration.
    pub fn validate(&self) -> Result<(), SimError> {
        for config in &self.configs {
            let _ = config.validate()?;
        }
        Ok(())
    }

    /// Replays already-parsed records against every configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if any configuration is invalid; no
    /// configuration is replayed in that case.
    pub fn run_records(&self, records: &[TraceRecord]) -> Result<Vec<SweepResult>, SimError> {
        self.validate()?;
        self.configs
            .iter()
            .map(|&config| -> Result<SweepResult, SimError> {
                let mut sim = Simulator::new(config)?;
                for &record in records {
                    let _ = sim.step(record);
                }
                let stats = *sim.cache().stats();
                Ok(SweepResult {
                    config,
                    stats,
                    miss_ratio: stats.miss_ratio(),
                    skipped: 0,
                })
            })
            .collect()
    }

    /// Reads the trace at `path` once and replays it against every configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] before touching the trace if any
    /// configuration is invalid, or [`SimError::TraceUnavailable`] if the trace
    /// cannot be read.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<Vec<SweepResult>, SimError> {
        self.validate()?;

        let mut records = Vec::new();
        let mut skipped = 0;
        for item in TraceReader::open(path)? {
            match item {
                Ok(record) => records.push(record),
                Err(err) if err.is_recoverable() => {
                    warn!("skipping {err}");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }
        info!(
            records = records.len(),
            configs = self.configs.len(),
            "running sweep"
        );

        let mut results = self.run_records(&records)?;
        for result in &mut results {
            result.skipped = skipped;
        }
        Ok(results)
    }
}
