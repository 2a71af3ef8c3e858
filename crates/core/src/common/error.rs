//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Geometry and policy values that cannot describe a cache.
//! 2. **Record Errors:** Reasons a single trace line is not a read or write record.
//! 3. **Simulation Errors:** The top-level error returned by replay, sweep and reporting.
//!
//! Configuration and trace-availability failures are fatal and surface once at the
//! caller. Malformed records are recoverable: the replay loop logs and skips them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An invalid cache configuration.
///
/// Raised before any cache storage is allocated; a cache is never built from a
/// configuration that fails validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The total cache size is zero.
    #[error("cache size must be positive")]
    ZeroSize,

    /// The associativity is zero.
    #[error("associativity must be positive")]
    ZeroAssociativity,

    /// The total size does not split evenly into sets of `ways` blocks.
    #[error(
        "cache size {size} is not a multiple of block size {block_size} x associativity {ways}"
    )]
    NotDivisible {
        /// Total cache size in bytes.
        size: usize,
        /// Block size in bytes.
        block_size: usize,
        /// Associativity.
        ways: usize,
    },

    /// The derived set count is zero or not a power of two.
    #[error("number of sets ({0}) is not a positive power of two")]
    SetCountNotPowerOfTwo(usize),

    /// A policy flag that is neither a known digit nor a known name.
    #[error("invalid {kind} policy '{value}'")]
    InvalidPolicy {
        /// Which policy was being parsed (`replacement` or `write`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// Why a trace line is not a read or write record.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The line has no operation marker.
    #[error("missing operation")]
    Empty,

    /// The line starts with something other than `R` or `W`.
    #[error("unknown operation '{0}'")]
    UnknownOperation(char),

    /// The operation marker runs straight into other text.
    #[error("operation marker not followed by whitespace in '{0}'")]
    MissingSeparator(String),

    /// The operation marker is not followed by an address.
    #[error("missing address")]
    MissingAddress,

    /// The address field is not a hexadecimal 64-bit value.
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The trace could not be opened or read.
    #[error("trace '{}' is unavailable: {source}", path.display())]
    TraceUnavailable {
        /// Location of the trace.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A single trace line could not be parsed.
    #[error("malformed trace record at line {line}: {reason}")]
    MalformedRecord {
        /// One-based line number.
        line: usize,
        /// Parse failure.
        #[source]
        reason: RecordError,
    },

    /// A configuration file could not be read.
    #[error("configuration '{}' is unavailable: {source}", path.display())]
    ConfigUnavailable {
        /// Location of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// JSON input could not be parsed or a report could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a report failed.
    #[error("report output failed: {0}")]
    Io(#[from] io::Error),
}

impl SimError {
    /// Returns `true` for errors the replay loop recovers from by skipping a record.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
