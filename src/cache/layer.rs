//! Look-aside Cache Layer
//!
//! Typed JSON access to a [`CacheBackend`]: lookups decode cached payloads,
//! population and invalidation are best effort and never fail the request.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{keys, CacheBackend};
use crate::error::Result;

/// Default lifetime of a cache entry
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// JSON look-aside cache over a shared backend.
#[derive(Clone)]
pub struct ItemCache {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
    fallback_on_error: bool,
}

impl ItemCache {
    /// Creates a cache with the default TTL that fails reads on backend errors.
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            ttl: DEFAULT_TTL,
            fallback_on_error: false,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// When set, a failed lookup is reported as a miss to be served from
    /// the store instead of failing the request.
    pub fn with_fallback_on_error(mut self, fallback: bool) -> Self {
        self.fallback_on_error = fallback;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn fallback_on_error(&self) -> bool {
        self.fallback_on_error
    }

    // == Lookup ==
    /// Fetches and decodes the payload under `key`.
    ///
    /// `Ok(None)` is a miss. Backend failures and undecodable payloads are
    /// errors.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)?;
                debug!(key, "cache hit");
                Ok(Some(value))
            }
            None => {
                debug!(key, "cache miss");
                Ok(None)
            }
        }
    }

    // == Populate ==
    /// Stores `value` under `key` for the configured TTL.
    pub async fn populate<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key, error = %err, "failed to encode cache payload");
                return;
            }
        };

        if let Err(err) = self.backend.set(key, payload, self.ttl).await {
            warn!(key, error = %err, "failed to populate cache");
        }
    }

    // == Invalidate ==
    /// Drops every listed key.
    pub async fn invalidate(&self, keys: &[String]) {
        for key in keys {
            match self.backend.delete(key).await {
                Ok(()) => debug!(key = key.as_str(), "cache entry invalidated"),
                Err(err) => warn!(key = key.as_str(), error = %err, "failed to invalidate cache entry"),
            }
        }
    }

    /// Keys made stale by creating an item.
    pub fn keys_for_create() -> Vec<String> {
        vec![keys::all()]
    }

    /// Keys made stale by updating or deleting item `id`.
    ///
    /// Search result sets are left to expire on their own.
    pub fn keys_for_change(id: u64) -> Vec<String> {
        vec![keys::all(), keys::item(id)]
    }
}
