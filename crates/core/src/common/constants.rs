//! Global Cache Constants.
//!
//! This module defines the fixed block geometry shared by every cache the simulator
//! builds: the block size in bytes and the matching offset width and mask.

/// Block (cache line) size in bytes.
///
/// Every cache built by the simulator uses 64-byte blocks; only the total size,
/// associativity and policies are configurable.
pub const BLOCK_SIZE: usize = 64;

/// Number of low address bits selecting a byte within a block.
pub const OFFSET_BITS: u32 = BLOCK_SIZE.trailing_zeros();

/// Mask for extracting the block offset from an address.
pub const OFFSET_MASK: u64 = (BLOCK_SIZE as u64) - 1;
