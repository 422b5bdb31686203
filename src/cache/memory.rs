//! In-process Cache Backend
//!
//! HashMap storage with LRU tracking and TTL expiration, usable in place of
//! Redis for single-instance deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheEntry, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{ItemError, Result};

// == Memory Store ==
/// Synchronous cache engine behind [`MemoryBackend`].
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new MemoryStore holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Set ==
    /// Stores a key-value pair living for `ttl`.
    ///
    /// An existing key is overwritten and its TTL reset. At capacity, the
    /// least recently used entry is evicted first.
    pub fn set(&mut self, key: String, value: String, ttl: Duration) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(ItemError::CacheBackend(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(ItemError::CacheBackend(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                }
                None => {
                    return Err(ItemError::CacheBackend(
                        "Cache is full and eviction failed".to_string(),
                    ));
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);

        Ok(())
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// Expired entries are removed on access.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;

        if entry.is_expired() {
            self.entries.remove(key);
            self.lru.remove(key);
            return None;
        }

        let value = entry.value.clone();
        self.lru.touch(key);
        Some(value)
    }

    // == Delete ==
    /// Removes an entry, returning whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
        }
        removed
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Memory Backend ==
/// Shareable handle to a [`MemoryStore`], implementing [`CacheBackend`].
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryBackend {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new(max_entries))),
        }
    }

    /// The shared engine, for the cleanup task.
    pub fn store(&self) -> Arc<RwLock<MemoryStore>> {
        self.store.clone()
    }

    /// Remaining lifetime of `key`, if it is cached.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.store.read().await.ttl_remaining(key)
    }

    /// Whether `key` currently holds a live entry.
    pub async fn contains(&self, key: &str) -> bool {
        self.ttl_remaining(key).await.is_some()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: expired entries are dropped and LRU order updated
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.store.write().await.set(key.to_string(), value, ttl)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.delete(key);
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(600);

    #[test]
    fn test_store_new() {
        let store = MemoryStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = MemoryStore::new(100);

        store.set("items:1".to_string(), "{}".to_string(), TTL).unwrap();

        assert_eq!(store.get("items:1").as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = MemoryStore::new(100);
        assert!(store.get("items:all").is_none());
    }

    #[test]
    fn test_store_delete() {
        let mut store = MemoryStore::new(100);

        store.set("items:1".to_string(), "{}".to_string(), TTL).unwrap();

        assert!(store.delete("items:1"));
        assert!(!store.delete("items:1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_overwrite_resets_value() {
        let mut store = MemoryStore::new(100);

        store.set("items:all".to_string(), "[]".to_string(), TTL).unwrap();
        store.set("items:all".to_string(), "[1]".to_string(), TTL).unwrap();

        assert_eq!(store.get("items:all").as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = MemoryStore::new(100);

        store
            .set("items:1".to_string(), "{}".to_string(), Duration::from_millis(50))
            .unwrap();
        assert!(store.get("items:1").is_some());

        sleep(Duration::from_millis(80));

        assert!(store.get("items:1").is_none());
        assert!(store.is_empty(), "expired entry is dropped on access");
    }

    #[test]
    fn test_store_ttl_remaining() {
        let mut store = MemoryStore::new(100);
        store.set("items:all".to_string(), "[]".to_string(), TTL).unwrap();

        let remaining = store.ttl_remaining("items:all").unwrap();
        assert!(remaining > Duration::from_secs(599));
        assert!(store.ttl_remaining("items:2").is_none());
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = MemoryStore::new(2);

        store.set("items:1".to_string(), "a".to_string(), TTL).unwrap();
        store.set("items:2".to_string(), "b".to_string(), TTL).unwrap();
        store.get("items:1");
        store.set("items:3".to_string(), "c".to_string(), TTL).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("items:2").is_none());
        assert!(store.get("items:1").is_some());
        assert!(store.get("items:3").is_some());
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = MemoryStore::new(100);

        store
            .set("items:1".to_string(), "a".to_string(), Duration::from_millis(50))
            .unwrap();
        store.set("items:2".to_string(), "b".to_string(), TTL).unwrap();

        sleep(Duration::from_millis(80));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("items:2").is_some());
    }

    #[test]
    fn test_store_key_too_long() {
        let mut store = MemoryStore::new(100);
        let long_key = format!("items:search:{}", "x".repeat(MAX_KEY_LENGTH));

        let result = store.set(long_key, "[]".to_string(), TTL);
        assert!(matches!(result, Err(ItemError::CacheBackend(_))));
    }

    #[test]
    fn test_store_value_too_large() {
        let mut store = MemoryStore::new(100);
        let large_value = "x".repeat(MAX_VALUE_SIZE + 1);

        let result = store.set("items:all".to_string(), large_value, TTL);
        assert!(matches!(result, Err(ItemError::CacheBackend(_))));
    }

    #[tokio::test]
    async fn test_backend_round_trip() {
        let backend = MemoryBackend::new(10);

        backend.set("items:all", "[]".to_string(), TTL).await.unwrap();
        assert_eq!(backend.get("items:all").await.unwrap().as_deref(), Some("[]"));
        assert!(backend.contains("items:all").await);

        backend.delete("items:all").await.unwrap();
        assert_eq!(backend.get("items:all").await.unwrap(), None);
        assert_eq!(backend.len().await, 0);
    }

    #[tokio::test]
    async fn test_backend_delete_absent_is_ok() {
        let backend = MemoryBackend::new(10);
        assert!(backend.delete("items:404").await.is_ok());
    }
}
