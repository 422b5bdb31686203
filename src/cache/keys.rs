//! Cache key construction
//!
//! Every key lives under the `items:` prefix. The segment after it tells the
//! query kinds apart: `all`, a bare numeric id, or `search:<name>`. A bare id
//! is all digits, so it can never collide with the other two.

/// Namespace shared by every item cache key
pub const CACHE_PREFIX: &str = "items:";

/// Key for the full item list
pub fn all() -> String {
    format!("{}all", CACHE_PREFIX)
}

/// Key for a single item
pub fn item(id: u64) -> String {
    format!("{}{}", CACHE_PREFIX, id)
}

/// Key for a search result set, using the search term as given
pub fn search(name: &str) -> String {
    format!("{}search:{}", CACHE_PREFIX, name)
}
