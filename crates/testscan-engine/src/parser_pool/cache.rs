//! Extraction cache keyed by content hash — identical bytes (duplicated fixtures,
//! re-scans of an unchanged file) skip straight to the cached `TestFile` instead of
//! re-parsing and re-extracting. Keyed by `(content_hash, framework)` rather than by
//! language alone, since the same bytes can only ever resolve to one framework but
//! we want the key shape to stay stable if detection later becomes content-dependent.

use moka::sync::Cache;
use testscan_core::TestFile;

type CacheKey = (u64, String);

/// In-memory LRU-ish cache (Moka's TinyLFU admission policy) over extracted
/// `TestFile`s.
pub struct ParseCache {
    inner: Cache<CacheKey, TestFile>,
}

impl ParseCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    pub fn get(&self, content_hash: u64, framework: &str) -> Option<TestFile> {
        self.inner.get(&(content_hash, framework.to_string()))
    }

    pub fn insert(&self, content_hash: u64, framework: &str, file: TestFile) {
        self.inner.insert((content_hash, framework.to_string()), file);
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    pub fn invalidate(&self, content_hash: u64, framework: &str) {
        self.inner.invalidate(&(content_hash, framework.to_string()));
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

/// Hash file content with xxh3 — fast, non-cryptographic, good enough for a
/// dedup key.
pub fn content_hash(bytes: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(bytes)
}
