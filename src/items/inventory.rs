//! Inventory
//!
//! The set of catalog items a player owns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::item::ItemId;

/// Owned item ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeSet<ItemId>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owns(&self, id: &str) -> bool {
        self.items.contains(id)
    }

    /// Add an item; returns false if it was already owned
    pub(crate) fn insert(&mut self, id: &str) -> bool {
        self.items.insert(id.to_string())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

impl FromIterator<ItemId> for Inventory {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
