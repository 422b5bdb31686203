//! Cache Module
//!
//! Look-aside caching for item queries: key construction, the backend
//! capability trait, an in-process TTL/LRU backend and a Redis backend.

mod backend;
mod entry;
pub mod keys;
mod layer;
mod lru;
mod memory;
mod redis_backend;


// Re-export public types
pub use backend::CacheBackend;
pub use entry::CacheEntry;
pub use layer::{ItemCache, DEFAULT_TTL};
pub use lru::LruTracker;
pub use memory::{MemoryBackend, MemoryStore};
pub use redis_backend::RedisBackend;

// == Public Constants ==
/// Maximum allowed key length in bytes for the in-process backend
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes for the in-process backend
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
