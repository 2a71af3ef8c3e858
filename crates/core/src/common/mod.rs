//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks shared by the cache model,
//! the trace reader and the reports. It includes:
//! 1. **Address Decomposition:** Tag/index/offset extraction for a given set count.
//! 2. **Constants:** The fixed 64-byte block geometry.
//! 3. **Memory Access:** Read/write classification of trace records.
//! 4. **Error Handling:** Configuration, record and simulation errors.

/// Address decomposition into tag, set index and block offset.
pub mod addr;

/// Fixed block geometry constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddr};
pub use constants::{BLOCK_SIZE, OFFSET_BITS};
pub use data::AccessType;
pub use error::{ConfigError, RecordError, SimError};
