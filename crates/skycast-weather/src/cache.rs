//! In-memory TTL cache for raw provider responses.
//!
//! Keyed by the fully resolved request URL, so two requests are only
//! collapsed when city, endpoint, and credentials all match. Stale entries
//! are ignored at read time, not proactively purged; the only eviction is
//! a full clear.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default entry lifetime. Short on purpose: the cache exists to collapse
/// duplicate calls within a fast UI interaction, not to serve stale data
/// across sessions.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Thread-safe response cache with time-based expiry.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl }
    }

    /// Fetch a fresh entry. Entries older than the TTL are treated as
    /// absent but left in place.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store a response, timestamped now. Replaces any previous entry for
    /// the same key.
    pub fn insert(&self, key: &str, value: Value) {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), CacheEntry { value, stored_at: Instant::now() });
    }

    /// Number of entries currently held, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_entry_is_returned() {
        let cache = ResponseCache::new(Duration::from_secs(5));
        cache.insert("k", json!({"temp": 290.0}));
        assert_eq!(cache.get("k"), Some(json!({"temp": 290.0})));
    }

    #[test]
    fn missing_key_is_none() {
        let cache = ResponseCache::default();
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn expired_entry_is_ignored_but_still_counted() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.insert("k", json!(1));
        assert_eq!(cache.get("k"), None);
        // Stale entries are not purged on read.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let cache = ResponseCache::default();
        cache.insert("k", json!(1));
        cache.insert("k", json!(2));
        assert_eq!(cache.get("k"), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ResponseCache::default();
        cache.insert("a", json!(1));
        cache.insert("b", json!(2));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_are_exact_urls() {
        let cache = ResponseCache::default();
        cache.insert("https://api/weather?q=London&appid=x", json!(1));
        assert_eq!(cache.get("https://api/weather?q=london&appid=x"), None);
    }
}
