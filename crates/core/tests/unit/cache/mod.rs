//! Cache model tests.

/// Hit/miss behaviour, eviction and set isolation.
pub mod cache_sim;

/// LRU and FIFO ordering, in isolation and through the cache.
pub mod policies;


/// Write-back and write-through memory traffic accounting.
pub mod write_policy;
