//! Trace Records and Trace Reader.
//!
//! This module turns a text trace into access records. It performs:
//! 1. **Record parsing:** `"<R|W> <address-hex>"` lines into [`TraceRecord`]s.
//! 2. **Streaming:** Line-by-line reading from any `BufRead`, tracking line numbers.
//! 3. **Error classification:** Malformed lines are recoverable per-line errors;
//!    failing to open or read the trace is fatal.
//!
//! Format details:
//! - Leading and trailing whitespace is ignored; blank lines are skipped silently.
//! - The first character selects the operation (`R` read, `W` write) and must
//!   be followed by whitespace.
//! - The first whitespace-separated field after it is the address, with an
//!   optional `0x`/`0X` prefix. Any further fields are ignored.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::common::data::AccessType;
use crate::common::error::{RecordError, SimError};

/// One memory access from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraceRecord {
    /// Read or write.
    pub op: AccessType,
    /// Byte address accessed.
    pub address: u64,
}

impl TraceRecord {
    /// A read of `address`.
    pub const fn read(address: u64) -> Self {
        Self {
            op: AccessType::Read,
            address,
        }
    }

    /// A write of `address`.
    pub const fn write(address: u64) -> Self {
        Self {
            op: AccessType::Write,
            address,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", self.op, self.address)
    }
}

impl FromStr for TraceRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let mut chars = line.chars();
        let marker = chars.next().ok_or(RecordError::Empty)?;
        let op = AccessType::from_marker(marker).ok_or(RecordError::UnknownOperation(marker))?;

        let rest = chars.as_str();
        if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
            let word = rest.split_whitespace().next().unwrap_or(rest);
            return Err(RecordError::MissingSeparator(format!("{marker}{word}")));
        }
        let field = rest
            .split_whitespace()
            .next()
            .ok_or(RecordError::MissingAddress)?;
        let digits = field
            .strip_prefix("0x")
            .or_else(|| field.strip_prefix("0X"))
            .unwrap_or(field);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RecordError::InvalidAddress(field.to_string()));
        }
        let address = u64::from_str_radix(digits, 16)
            .map_err(|_| RecordError::InvalidAddress(field.to_string()))?;

        Ok(Self { op, address })
    }
}

/// Parses one trace line.
///
/// # Returns
///
/// `Ok(None)` for a blank line, `Ok(Some(record))` for a read or write record.
///
/// # Errors
///
/// Returns a [`RecordError`] describing why a non-blank line is not a record.
pub fn parse_line(line: &str) -> Result<Option<TraceRecord>, RecordError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// Streaming reader over a text trace.
///
/// Yields one item per non-blank line: `Ok(record)` for a well-formed record,
/// [`SimError::MalformedRecord`] for a line that is not one, and
/// [`SimError::TraceUnavailable`] (after which the reader is exhausted) if the
/// underlying stream fails.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    path: PathBuf,
    line: usize,
    failed: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceUnavailable`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SimError::TraceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_path(BufReader::new(file), path))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps an in-memory or already-open stream.
    pub fn new(reader: R) -> Self {
        Self::with_path(reader, "<stream>")
    }

    /// Wraps a stream, naming it `path` in errors.
    pub fn with_path(reader: R, path: impl AsRef<Path>) -> Self {
        Self {
            lines: reader.lines(),
            path: path.as_ref().to_path_buf(),
            line: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far, including blank and malformed lines.
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    self.line += 1;
                    return Some(Err(SimError::MalformedRecord {
                        line: self.line,
                        reason: RecordError::InvalidEncoding,
                    }));
                }
                Err(source) => {
                    self.failed = true;
                    return Some(Err(SimError::TraceUnavailable {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };
            self.line += 1;
            match parse_line(&text) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(reason) => {
                    return Some(Err(SimError::MalformedRecord {
                        line: self.line,
                        reason,
                    }));
                }
            }
        }
    }
}
