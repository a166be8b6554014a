//! Player profile
//!
//! Everything a session owns for one player: stats plus owned and
//! equipped gear.

use serde::{Deserialize, Serialize};

use super::stats::{CombatStats, PlayerStats};
use crate::items::{effective_stats, Catalog, Equipment, Inventory};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub stats: PlayerStats,
    pub inventory: Inventory,
    pub equipped: Equipment,
}

impl Profile {
    pub fn new(stats: PlayerStats, inventory: Inventory, equipped: Equipment) -> Self {
        Self { stats, inventory, equipped }
    }

    /// Gear-inclusive stats for combat
    pub fn combat_stats(&self, catalog: &Catalog) -> CombatStats {
        effective_stats(&self.stats, &self.equipped, catalog)
    }
}
