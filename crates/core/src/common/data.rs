//! Memory Access Types.
//!
//! This module defines the classification of trace accesses used throughout the simulator.
//! These types are used for the following:
//! 1. **Trace Decoding:** Mapping the leading `R`/`W` marker of a record to an operation.
//! 2. **Write Policy:** Deciding whether an access produces memory-write traffic.
//! 3. **Statistics Tracking:** Counting reads and writes separately.

use std::fmt;

use serde::Serialize;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessType {
    /// Data read access (`R` in a trace).
    ///
    /// A miss fetches the block from backing memory.
    Read,

    /// Data write access (`W` in a trace).
    ///
    /// Propagated immediately under write-through, deferred under write-back.
    Write,
}

impl AccessType {
    /// Maps a trace marker character to an access type.
    ///
    /// Only the uppercase markers used by the trace format are recognized.
    pub const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'R' => Some(Self::Read),
            'W' => Some(Self::Write),
            _ => None,
        }
    }

    /// Returns the trace marker character for this access type.
    pub const fn marker(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
        }
    }

    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}
