use std::io::Write;

use cachesim_core::Cache;
use cachesim_core::common::{AddressDecoder, DecodedAddr};
use cachesim_core::config::{CacheConfig, ReplacementPolicy, WritePolicy};
use tempfile::NamedTempFile;

/// Installs a test log subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("cachesim_core=debug")
        .with_test_writer()
        .try_init();
}

/// Builds a cache, panicking on an invalid configuration.
pub fn cache(size: usize, ways: usize, policy: ReplacementPolicy, wp: WritePolicy) -> Cache {
    init_tracing();
    Cache::new(CacheConfig::new(size, ways, policy, wp)).unwrap()
}

/// Address of byte `offset` in the block with `tag` mapping to set `index`.
pub fn addr(decoder: &AddressDecoder, tag: u64, index: usize, offset: u64) -> u64 {
    decoder.compose(DecodedAddr { tag, index, offset })
}

/// Tags of the occupied slots of set `index`, bottom to top.
pub fn set_tags(cache: &Cache, index: usize) -> Vec<u64> {
    cache
        .set(index)
        .map(|set| set.occupied().iter().map(|b| b.tag).collect())
        .unwrap_or_default()
}

/// Writes `contents` to a temporary trace file.
pub fn trace_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
