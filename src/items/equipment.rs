//! Equipment system
//!
//! Tracks the equipped item per slot and resolves gear into combat stats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::item::{ItemId, ItemType, StatBonus};
use crate::player::{CombatStats, PlayerStats};

/// Player equipment slots, at most one item each
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equipment {
    slots: BTreeMap<ItemType, ItemId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the item id in a slot
    pub fn get(&self, slot: ItemType) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn is_empty(&self, slot: ItemType) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Check whether an item is equipped in any slot
    pub fn is_equipped(&self, id: &str) -> bool {
        self.slots.values().any(|equipped| equipped == id)
    }

    /// All equipped ids with their slot
    pub fn iter(&self) -> impl Iterator<Item = (ItemType, &str)> {
        self.slots.iter().map(|(slot, id)| (*slot, id.as_str()))
    }

    /// Put an item in a slot, returning the previous occupant.
    /// Ownership and type checks belong to [`crate::items::shop::equip`].
    pub(crate) fn set(&mut self, slot: ItemType, id: &str) -> Option<ItemId> {
        self.slots.insert(slot, id.to_string())
    }

    pub(crate) fn clear(&mut self, slot: ItemType) -> Option<ItemId> {
        self.slots.remove(&slot)
    }
}

/// Total bonus from all equipped items
///
/// Ids missing from the catalog contribute nothing.
pub fn gear_bonus(equipped: &Equipment, catalog: &Catalog) -> StatBonus {
    let mut total = StatBonus::default();
    for (slot, id) in equipped.iter() {
        match catalog.get(id) {
            Some(item) => total += item.stat_bonus,
            None => log::warn!("Equipped {} item {} is not in the catalog", slot, id),
        }
    }
    total
}

/// Base stats plus gear; the only stats combat should use
pub fn effective_stats(base: &PlayerStats, equipped: &Equipment, catalog: &Catalog) -> CombatStats {
    let bonus = gear_bonus(equipped, catalog);
    CombatStats {
        atk: base.atk.saturating_add(bonus.atk()),
        def: base.def.saturating_add(bonus.def()),
        hp: base.hp.saturating_add(bonus.hp()),
        max_hp: base.max_hp.saturating_add(bonus.hp()),
        crit: base.crit,
    }
}
