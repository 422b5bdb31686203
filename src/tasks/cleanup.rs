//! TTL Cleanup Task
//!
//! Background task that periodically drops expired entries from the
//! in-process cache backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryStore;

/// Spawns a background task that sweeps expired cache entries.
///
/// Runs until aborted, sleeping `cleanup_interval_secs` (at least one)
/// between sweeps. Returns the handle used to abort it on shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<MemoryStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(RwLock::new(MemoryStore::new(100)));

        {
            let mut cache_guard = cache.write().await;
            cache_guard
                .set(
                    "items:all".to_string(),
                    "[]".to_string(),
                    Duration::from_millis(200),
                )
                .unwrap();
            cache_guard
                .set("items:1".to_string(), "{}".to_string(), Duration::from_secs(600))
                .unwrap();
        }

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let cache_guard = cache.read().await;
            assert_eq!(cache_guard.len(), 1, "only the expired entry is swept");
            assert!(cache_guard.ttl_remaining("items:1").is_some());
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(RwLock::new(MemoryStore::new(100)));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
