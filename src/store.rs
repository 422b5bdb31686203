//! Item Store Module
//!
//! The authoritative in-process collection of items. Answers point and
//! predicate queries and applies mutations; callers wrap it in a lock.

use crate::error::{ItemError, Result};
use crate::models::Item;

/// Reported when a search is attempted without a name to look for.
pub const MISSING_SEARCH_NAME: &str = "Missing name query parameter";

// == Item Store ==
/// Ordered collection of items, kept in insertion order.
#[derive(Debug, Clone)]
pub struct ItemStore {
    /// Items in insertion order
    items: Vec<Item>,
    /// Next id to hand out; never reused after deletion
    next_id: u64,
}

impl ItemStore {
    // == Constructor ==
    /// Creates an empty store whose first item gets id 1.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a store holding the given items.
    ///
    /// Later duplicates of an id are dropped so ids stay unique. The id
    /// counter starts past the largest seeded id; seeding `u64::MAX` leaves
    /// no id for [`create`](Self::create) to hand out.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut store = Self::new();
        for item in items {
            if store.position(item.id).is_some() {
                continue;
            }
            store.next_id = store.next_id.max(item.id.saturating_add(1));
            store.items.push(item);
        }
        store
    }

    /// Creates a store with the two demo items.
    pub fn seeded() -> Self {
        Self::with_items([Item::new(1, "item one"), Item::new(2, "item two")])
    }

    // == List All ==
    /// Returns every item in insertion order.
    pub fn list_all(&self) -> Vec<Item> {
        self.items.clone()
    }

    // == Get By Id ==
    pub fn get_by_id(&self, id: u64) -> Result<Item> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(ItemError::NotFound(id))
    }

    // == Search By Name ==
    /// Returns items whose name contains `needle`, ignoring case.
    ///
    /// An empty needle is rejected; no match yields an empty vector.
    pub fn search_by_name(&self, needle: &str) -> Result<Vec<Item>> {
        if needle.is_empty() {
            return Err(ItemError::Validation(MISSING_SEARCH_NAME.to_string()));
        }

        let needle = needle.to_lowercase();
        Ok(self
            .items
            .iter()
            .filter(|item| item.name_contains(&needle))
            .cloned()
            .collect())
    }

    // == Create ==
    /// Appends a new item under the next free id and returns it.
    ///
    /// `u64::MAX` is never handed out, so the counter cannot wrap.
    pub fn create(&mut self, name: impl Into<String>) -> Result<Item> {
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(ItemError::IdsExhausted)?;

        let item = Item::new(self.next_id, name);
        self.next_id = next_id;
        self.items.push(item.clone());
        Ok(item)
    }

    // == Update ==
    /// Replaces the name of the matching item. The id never changes.
    pub fn update(&mut self, id: u64, name: impl Into<String>) -> Result<Item> {
        let index = self.position(id).ok_or(ItemError::NotFound(id))?;
        let item = &mut self.items[index];
        item.name = name.into();
        Ok(item.clone())
    }

    // == Delete ==
    /// Removes the matching item, returning whether anything was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
