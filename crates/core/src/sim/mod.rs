//! Trace replay.
//!
//! Provides the trace reader, the single-configuration simulator and
//! multi-configuration sweeps.

/// Replay of one trace against a single cache.
pub mod simulator;

/// Replay of one trace against several cache configurations.
pub mod sweep;

/// Trace records and the line-oriented trace reader.
pub mod trace;

pub use simulator::{ReplaySummary, Simulator, run};
pub use sweep::{SweepConfig, SweepResult};
pub use trace::{TraceReader, TraceRecord, parse_line};
