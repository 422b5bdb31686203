//! Cache Backend Trait
//!
//! The key-value capability the look-aside layer needs from a cache server.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// String key-value store with per-entry expiry.
///
/// A missing or expired key is `Ok(None)`; `Err` is reserved for the backend
/// itself failing.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetches the payload stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
