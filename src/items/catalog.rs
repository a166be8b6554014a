//! Shop catalog
//!
//! Read-only collection of [`ShopItem`]s, listed in ascending price order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::{ItemType, ShopItem};

/// Problems with catalog data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate item id: {0}")]
    DuplicateId(String),
    #[error("item {0} has no price")]
    ZeroPrice(String),
}

/// The shop catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShopItem>", into = "Vec<ShopItem>")]
pub struct Catalog {
    items: Vec<ShopItem>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and free items
    pub fn new(mut items: Vec<ShopItem>) -> Result<Self, CatalogError> {
        items.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.id.cmp(&b.id)));

        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if item.price == 0 {
                return Err(CatalogError::ZeroPrice(item.id.clone()));
            }
            if index.insert(item.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self { items, index })
    }

    /// Find an item by id
    pub fn get(&self, id: &str) -> Option<&ShopItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All items, cheapest first
    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    /// Items of one category, cheapest first
    pub fn by_type(&self, item_type: ItemType) -> impl Iterator<Item = &ShopItem> {
        self.items.iter().filter(move |i| i.item_type == item_type)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<Vec<ShopItem>> for Catalog {
    type Error = CatalogError;

    fn try_from(items: Vec<ShopItem>) -> Result<Self, Self::Error> {
        Catalog::new(items)
    }
}

impl From<Catalog> for Vec<ShopItem> {
    fn from(catalog: Catalog) -> Self {
        catalog.items
    }
}
