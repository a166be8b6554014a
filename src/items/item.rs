//! Shop item definitions
//!
//! Catalog entries are immutable configuration; players only ever hold
//! their ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Unique catalog id of an item
pub type ItemId = String;

/// Item category; doubles as the equipment slot it fits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Armor,
    Shield,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Shield => "shield",
        }
    }

    pub fn from_label(label: &str) -> Option<ItemType> {
        ItemType::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(label.trim()))
    }

    /// Every slot in display order
    pub fn all() -> &'static [ItemType] {
        &[ItemType::Weapon, ItemType::Armor, ItemType::Shield]
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Partial stat bonus granted by an item; absent fields count as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atk: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
}

impl StatBonus {
    pub fn atk(&self) -> u32 {
        self.atk.unwrap_or(0)
    }

    pub fn def(&self) -> u32 {
        self.def.unwrap_or(0)
    }

    pub fn hp(&self) -> u32 {
        self.hp.unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.atk() == 0 && self.def() == 0 && self.hp() == 0
    }

    /// Short label for the most significant bonus ("+5 ATK")
    pub fn label(&self) -> String {
        if self.atk() > 0 {
            format!("+{} ATK", self.atk())
        } else if self.def() > 0 {
            format!("+{} DEF", self.def())
        } else if self.hp() > 0 {
            format!("+{} HP", self.hp())
        } else {
            String::new()
        }
    }
}

impl Add for StatBonus {
    type Output = StatBonus;

    fn add(self, rhs: StatBonus) -> StatBonus {
        let sum = |a: Option<u32>, b: Option<u32>| match (a, b) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0).saturating_add(b.unwrap_or(0))),
        };
        StatBonus {
            atk: sum(self.atk, rhs.atk),
            def: sum(self.def, rhs.def),
            hp: sum(self.hp, rhs.hp),
        }
    }
}

impl AddAssign for StatBonus {
    fn add_assign(&mut self, rhs: StatBonus) {
        *self = *self + rhs;
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub price: u32,
    #[serde(default)]
    pub stat_bonus: StatBonus,
    /// Sprite key used by the renderer
    #[serde(default)]
    pub asset_key: String,
}

impl ShopItem {
    pub fn new(id: &str, name: &str, item_type: ItemType, price: u32, stat_bonus: StatBonus) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            item_type,
            price,
            stat_bonus,
            asset_key: id.to_string(),
        }
    }

    pub fn description(&self) -> String {
        format!("{} - {}", self.name, self.item_type)
    }
}
