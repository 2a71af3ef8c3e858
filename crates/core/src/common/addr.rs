//! Address Decomposition.
//!
//! This module splits raw trace addresses into the three fields a set-associative
//! cache needs. It provides the following:
//! 1. **Field Extraction:** Tag, set index and block offset for a given set count.
//! 2. **Reconstruction:** The inverse mapping, used by reports and tests.
//!
//! Layout of a 64-bit address with `index_bits = log2(num_sets)`:
//!
//! ```text
//!  63                 6+index_bits   6             0
//! +------------------------+-----------+-----------+
//! |          tag           |   index   |  offset   |
//! +------------------------+-----------+-----------+
//! ```

use super::constants::{OFFSET_BITS, OFFSET_MASK};
use super::error::ConfigError;

/// The three fields of a decomposed address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// High-order bits identifying the memory block.
    pub tag: u64,
    /// Set selected by the address.
    pub index: usize,
    /// Byte within the 64-byte block.
    pub offset: u64,
}

/// Splits addresses into tag, index and offset for a fixed set count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    index_bits: u32,
    index_mask: u64,
}

impl AddressDecoder {
    /// Creates a decoder for a cache with `num_sets` sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SetCountNotPowerOfTwo`] when `num_sets` is zero or
    /// not a power of two; the index field would not be a contiguous bit range.
    pub fn new(num_sets: usize) -> Result<Self, ConfigError> {
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(num_sets));
        }
        let index_bits = num_sets.trailing_zeros();
        Ok(Self {
            index_bits,
            index_mask: (num_sets as u64) - 1,
        })
    }

    /// Number of bits in the set index field.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Number of sets this decoder maps onto.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        1 << self.index_bits
    }

    /// Shift that moves the tag field down to bit 0.
    #[inline]
    const fn tag_shift(&self) -> u32 {
        OFFSET_BITS + self.index_bits
    }

    /// Extracts the block offset (low 6 bits).
    #[inline(always)]
    pub const fn offset(&self, address: u64) -> u64 {
        address & OFFSET_MASK
    }

    /// Extracts the set index (the `index_bits` bits above the offset).
    #[inline(always)]
    pub const fn index(&self, address: u64) -> usize {
        ((address >> OFFSET_BITS) & self.index_mask) as usize
    }

    /// Extracts the tag (all bits above the index).
    ///
    /// With a 64-bit address and at most 58 index bits the shift never
    /// reaches the address width, so `checked_shr` only guards the degenerate case.
    #[inline(always)]
    pub const fn tag(&self, address: u64) -> u64 {
        match address.checked_shr(self.tag_shift()) {
            Some(tag) => tag,
            None => 0,
        }
    }

    /// Splits `address` into its tag, index and offset.
    pub const fn decompose(&self, address: u64) -> DecodedAddr {
        DecodedAddr {
            tag: self.tag(address),
            index: self.index(address),
            offset: self.offset(address),
        }
    }

    /// Rebuilds the address a [`DecodedAddr`] was taken from.
    pub const fn compose(&self, decoded: DecodedAddr) -> u64 {
        let tag = match decoded.tag.checked_shl(self.tag_shift()) {
            Some(tag) => tag,
            None => 0,
        };
        tag | ((decoded.index as u64) << OFFSET_BITS) | (decoded.offset & OFFSET_MASK)
    }
}
