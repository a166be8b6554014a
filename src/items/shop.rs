//! Shop transactions
//!
//! Purchasing and equipping. Every operation takes the current profile and
//! returns a new one, or an error with the input left untouched, so a
//! purchase can never deduct gold without granting the item.

use thiserror::Error;

use super::catalog::Catalog;
use super::item::ItemType;
use crate::player::Profile;

/// Rejected shop action; nothing was changed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("item {0} is already owned")]
    AlreadyOwned(String),
    #[error("not enough gold: need {price}, have {gold}")]
    InsufficientGold { price: u32, gold: u32 },
    #[error("item {0} is not in the inventory")]
    NotOwned(String),
    #[error("item {id} is a {actual}, not a {slot}")]
    WrongSlot { id: String, slot: ItemType, actual: ItemType },
}

/// Buy an item with gold and add it to the inventory
pub fn purchase(profile: &Profile, catalog: &Catalog, item_id: &str) -> Result<Profile, ShopError> {
    let item = catalog
        .get(item_id)
        .ok_or_else(|| ShopError::UnknownItem(item_id.to_string()))?;

    if profile.inventory.owns(item_id) {
        return Err(ShopError::AlreadyOwned(item_id.to_string()));
    }
    if item.price > profile.stats.gold {
        return Err(ShopError::InsufficientGold {
            price: item.price,
            gold: profile.stats.gold,
        });
    }

    let mut next = profile.clone();
    next.stats.gold -= item.price;
    next.inventory.insert(item_id);

    log::info!("Purchased {} for {} gold ({} left)", item.name, item.price, next.stats.gold);
    Ok(next)
}

/// Equip an owned item into the slot matching its type
pub fn equip(profile: &Profile, catalog: &Catalog, slot: ItemType, item_id: &str) -> Result<Profile, ShopError> {
    if !profile.inventory.owns(item_id) {
        return Err(ShopError::NotOwned(item_id.to_string()));
    }
    let item = catalog
        .get(item_id)
        .ok_or_else(|| ShopError::UnknownItem(item_id.to_string()))?;
    if item.item_type != slot {
        return Err(ShopError::WrongSlot {
            id: item_id.to_string(),
            slot,
            actual: item.item_type,
        });
    }

    let mut next = profile.clone();
    if let Some(previous) = next.equipped.set(slot, item_id) {
        log::debug!("Unequipped {} from {}", previous, slot);
    }
    log::info!("Equipped {} as {}", item.name, slot);
    Ok(next)
}

/// Empty a slot
pub fn unequip(profile: &Profile, slot: ItemType) -> Profile {
    let mut next = profile.clone();
    next.equipped.clear(slot);
    next
}
