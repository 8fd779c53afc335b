//! Analysis cache: Moka in-memory, keyed by identifier + content hash.
//! Same identifier and text always produce the same analysis.

use std::sync::Arc;

use moka::sync::Cache;

use super::engine::FileAnalysis;

/// In-memory analysis cache using Moka (TinyLFU admission).
pub struct AnalysisCache {
    inner: Cache<u64, Arc<FileAnalysis>>,
}

impl AnalysisCache {
    /// Create a new cache with the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    /// Return the cached analysis for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: u64, compute: impl FnOnce() -> FileAnalysis) -> Arc<FileAnalysis> {
        self.inner.get_with(key, || Arc::new(compute()))
    }

    /// Returns the number of entries in the cache.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(routelens_core::config::DEFAULT_CACHE_CAPACITY)
    }
}
