//! Time-boxed response cache shared by both transport paths
//!
//! Entries live for a fixed TTL and are evicted lazily on the next lookup;
//! there is no eviction thread and no capacity bound. The cache is owned by
//! the client that created it, so its lifetime matches the client's rather
//! than being process-global.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

/// How long a cached GitHub response stays fresh.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    data: Value,
    inserted_at: Instant,
}

/// Key/value store for raw JSON responses with per-entry expiry.
///
/// Concurrent fetches for the same key can both miss and both populate;
/// last write wins. GitHub responses are idempotent for a given query
/// within the TTL window, so the duplicate request is an accepted
/// inefficiency rather than a correctness problem.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the stored value while it is still fresh.
    ///
    /// A stale entry is removed on lookup and reported as absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a value under the key, replacing any previous entry.
    pub fn put(&self, key: &str, data: Value) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                inserted_at: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
