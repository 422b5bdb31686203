//! Item Service
//!
//! Runs each item operation against the store, through the look-aside cache
//! when one is configured.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::{keys, ItemCache};
use crate::error::{ItemError, Result};
use crate::models::Item;
use crate::store::ItemStore;

// == Item Service ==
/// Shared entry point for the request handlers.
///
/// Cloning is cheap; clones share the same store and cache.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<RwLock<ItemStore>>,
    cache: Option<ItemCache>,
}

impl ItemService {
    /// Serves every operation straight from the store.
    pub fn uncached(store: ItemStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            cache: None,
        }
    }

    /// Puts `cache` in front of the store.
    pub fn cached(store: ItemStore, cache: ItemCache) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            cache: Some(cache),
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    // == Reads ==
    pub async fn list_all(&self) -> Result<Vec<Item>> {
        self.read_through(keys::all(), |store| Ok(store.list_all()))
            .await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Item> {
        self.read_through(keys::item(id), |store| store.get_by_id(id))
            .await
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Item>> {
        self.read_through(keys::search(name), |store| store.search_by_name(name))
            .await
    }

    // == Writes ==
    pub async fn create(&self, name: String) -> Result<Item> {
        let item = self.store.write().await.create(name)?;
        info!(id = item.id, "item created");

        if let Some(cache) = &self.cache {
            cache.invalidate(&ItemCache::keys_for_create()).await;
        }
        Ok(item)
    }

    pub async fn update(&self, id: u64, name: String) -> Result<Item> {
        let item = self.store.write().await.update(id, name)?;
        info!(id, "item updated");

        if let Some(cache) = &self.cache {
            cache.invalidate(&ItemCache::keys_for_change(id)).await;
        }
        Ok(item)
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        if !self.store.write().await.delete(id) {
            return Err(ItemError::NotFound(id));
        }
        info!(id, "item deleted");

        if let Some(cache) = &self.cache {
            cache.invalidate(&ItemCache::keys_for_change(id)).await;
        }
        Ok(())
    }

    // == Read Through ==
    /// Serves `key` from the cache, or runs `query` on a miss and caches
    /// its result. Errors from `query` (such as not-found) are never cached.
    async fn read_through<T, F>(&self, key: String, query: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&ItemStore) -> Result<T>,
    {
        let Some(cache) = &self.cache else {
            return query(&*self.store.read().await);
        };

        match cache.lookup::<T>(&key).await {
            Ok(Some(hit)) => return Ok(hit),
            Ok(None) => {}
            Err(err) if cache.fallback_on_error() => {
                warn!(key = key.as_str(), error = %err, "cache lookup failed, reading from store");
                return query(&*self.store.read().await);
            }
            Err(err) => return Err(err),
        }

        let value = query(&*self.store.read().await)?;
        cache.populate(&key, &value).await;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBackend, MemoryBackend, DEFAULT_TTL};

    fn cached_service() -> (ItemService, MemoryBackend) {
        let backend = MemoryBackend::new(100);
        let cache = ItemCache::new(Arc::new(backend.clone()));
        (ItemService::cached(ItemStore::seeded(), cache), backend)
    }

    #[tokio::test]
    async fn test_uncached_operations() {
        let service = ItemService::uncached(ItemStore::seeded());
        assert!(!service.is_cached());

        assert_eq!(service.list_all().await.unwrap().len(), 2);
        let created = service.create("item three".to_string()).await.unwrap();
        assert_eq!(created, Item::new(3, "item three"));
        assert_eq!(service.get_by_id(3).await.unwrap(), created);
        service.delete(3).await.unwrap();
        assert!(matches!(
            service.get_by_id(3).await,
            Err(ItemError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_list_populates_cache() {
        let (service, backend) = cached_service();

        let items = service.list_all().await.unwrap();

        let raw = backend.get("items:all").await.unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Vec<Item>>(&raw).unwrap(), items);
    }

    #[tokio::test]
    async fn test_hit_is_served_without_revalidation() {
        let (service, backend) = cached_service();
        let stale = vec![Item::new(9, "stale")];
        backend
            .set("items:all", serde_json::to_string(&stale).unwrap(), DEFAULT_TTL)
            .await
            .unwrap();

        assert_eq!(service.list_all().await.unwrap(), stale);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let (service, backend) = cached_service();

        assert!(service.get_by_id(77).await.is_err());
        assert!(!backend.contains("items:77").await);
    }

    #[tokio::test]
    async fn test_empty_search_rejected_and_not_cached() {
        let (service, backend) = cached_service();

        assert!(matches!(
            service.search_by_name("").await,
            Err(ItemError::Validation(_))
        ));
        assert_eq!(backend.len().await, 0);
    }

    #[tokio::test]
    async fn test_update_invalidates_item_and_list() {
        let (service, backend) = cached_service();
        service.list_all().await.unwrap();
        service.get_by_id(1).await.unwrap();
        service.search_by_name("one").await.unwrap();

        let updated = service.update(1, "renamed".to_string()).await.unwrap();

        assert_eq!(updated, Item::new(1, "renamed"));
        assert!(!backend.contains("items:all").await);
        assert!(!backend.contains("items:1").await);
        assert!(backend.contains("items:search:one").await);
        assert_eq!(service.get_by_id(1).await.unwrap().name, "renamed");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_cache_alone() {
        let (service, backend) = cached_service();
        service.list_all().await.unwrap();

        assert!(service.update(50, "x".to_string()).await.is_err());
        assert!(backend.contains("items:all").await);
    }
}
