//! Request DTOs for the items API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::error::{ItemError, Result};
use crate::store::MISSING_SEARCH_NAME;

/// Request body for POST /items and PUT /items/:id
///
/// Accepts the full Item shape. The `id` is ignored on create and
/// overridden by the path parameter on update.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPayload {
    /// Client-supplied id, never trusted
    #[serde(default)]
    pub id: Option<u64>,
    /// The item name
    pub name: String,
}

/// Query string for GET /items/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Substring to look for in item names
    #[serde(default)]
    pub name: Option<String>,
}

impl SearchQuery {
    /// Returns the search term, rejecting a missing or empty `name`.
    pub fn term(&self) -> Result<&str> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ItemError::Validation(MISSING_SEARCH_NAME.to_string())),
        }
    }
}
