//! The Item record
//!
//! The single domain type, serialized exactly as `{"id": <integer>, "name": <string>}`
//! both on the wire and inside cache entries.

use serde::{Deserialize, Serialize};

/// An item with an integer id and a free-form name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, positive identifier assigned by the store
    pub id: u64,
    /// Free-form name
    pub name: String,
}

impl Item {
    /// Creates a new Item
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Case-insensitive substring match against the name.
    ///
    /// `needle_lower` must already be lowercased.
    pub(crate) fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}
