//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which cache backend sits in front of the item store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    /// External Redis server
    Redis,
    /// In-process TTL/LRU cache
    Memory,
    /// No cache, every read goes to the store
    Disabled,
}

impl FromStr for CacheBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            "none" | "disabled" | "off" => Ok(Self::Disabled),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Cache backend in front of the store
    pub cache_backend: CacheBackendKind,
    /// Redis connection URL, credentials included
    pub redis_url: String,
    /// TTL in seconds for every cache entry
    pub cache_ttl: u64,
    /// Maximum number of entries the in-process cache can hold
    pub cache_max_entries: usize,
    /// In-process cache cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Serve reads from the store when a cache lookup fails
    pub cache_fallback_on_error: bool,
    /// Start with the two demo items
    pub seed_items: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CACHE_BACKEND` - `redis`, `memory` or `none` (default: redis)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 600)
    /// - `CACHE_MAX_ENTRIES` - In-process cache capacity (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `CACHE_FALLBACK_ON_ERROR` - Degrade to store reads (default: false)
    /// - `SEED_ITEMS` - Seed demo items (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            server_port: parsed(&lookup, "SERVER_PORT").unwrap_or(defaults.server_port),
            cache_backend: parsed(&lookup, "CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_ttl: parsed(&lookup, "CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_max_entries: parsed(&lookup, "CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cleanup_interval: parsed(&lookup, "CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            cache_fallback_on_error: parsed(&lookup, "CACHE_FALLBACK_ON_ERROR")
                .unwrap_or(defaults.cache_fallback_on_error),
            seed_items: parsed(&lookup, "SEED_ITEMS").unwrap_or(defaults.seed_items),
        }
    }

    /// Cache entry TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

fn parsed<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cache_backend: CacheBackendKind::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            cache_ttl: 600,
            cache_max_entries: 1000,
            cleanup_interval: 1,
            cache_fallback_on_error: false,
            seed_items: true,
        }
    }
}
