//! Item system

pub mod item;
pub mod catalog;
pub mod inventory;
pub mod equipment;
pub mod shop;

pub use item::{ItemId, ItemType, ShopItem, StatBonus};
pub use catalog::{Catalog, CatalogError};
pub use inventory::Inventory;
pub use equipment::{Equipment, effective_stats, gear_bonus};
pub use shop::{ShopError, purchase, equip, unequip};
