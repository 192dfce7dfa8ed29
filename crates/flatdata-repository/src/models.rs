//! Bookkeeping for the in-memory cache of hydrated record sets

/// Counters kept by [`MemoryCache`](crate::MemoryCache)
///
/// `size` and `memory_bytes` describe the entries held right now;
/// `hits` and `misses` accumulate until the cache is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Cached record sets
    pub size: usize,
    /// Serialized bytes across all entries
    pub memory_bytes: usize,
}

impl CacheStats {
    /// Lookups served so far, hit or miss
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups answered from the cache, 0.0 before any lookup
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}
