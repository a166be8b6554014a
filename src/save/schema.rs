//! Row shapes
//!
//! Stored rows use snake_case columns and signed integers, the way the
//! hosted tables expose them. Converting a row into a core type validates
//! it; converting back never fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::{Equipment, ItemType, ShopItem, StatBonus};
use crate::player::{PlayerStats, Rank};
use crate::ranking::tier_for_points;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("column {column} is negative ({value})")]
    Negative { column: &'static str, value: i64 },
    #[error("column {column} is out of range ({value})")]
    OutOfRange { column: &'static str, value: i64 },
    #[error("level must be at least 1")]
    ZeroLevel,
    #[error("exp {exp} does not fit below level {level}")]
    ExpOverflow { exp: u32, level: u32 },
    #[error("hp {hp} exceeds max_hp {max_hp}")]
    HpAboveMax { hp: u32, max_hp: u32 },
    #[error("crit {0} is outside [0, 1]")]
    CritOutOfRange(f64),
    #[error("unknown rank label {0:?}")]
    UnknownRank(String),
    #[error("unknown item type {0:?}")]
    UnknownItemType(String),
    #[error("item {0} has no price")]
    ZeroPrice(String),
}

fn column(name: &'static str, value: i64) -> Result<u32, SchemaError> {
    if value < 0 {
        return Err(SchemaError::Negative { column: name, value });
    }
    u32::try_from(value).map_err(|_| SchemaError::OutOfRange { column: name, value })
}

/// One row of `user_stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsRow {
    pub user_id: String,
    pub level: i64,
    pub exp: i64,
    pub atk: i64,
    pub def: i64,
    pub crit: f64,
    pub hp: i64,
    pub max_hp: i64,
    pub rank: String,
    pub rank_points: i64,
    pub win_streak: i64,
    pub mastered_words_count: i64,
    pub login_days: i64,
    pub gold: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_day: Option<i64>,
}

impl UserStatsRow {
    pub fn from_stats(user_id: &str, stats: &PlayerStats) -> Self {
        Self {
            user_id: user_id.to_string(),
            level: stats.level.into(),
            exp: stats.exp.into(),
            atk: stats.atk.into(),
            def: stats.def.into(),
            crit: stats.crit,
            hp: stats.hp.into(),
            max_hp: stats.max_hp.into(),
            rank: stats.rank.name().to_string(),
            rank_points: stats.rank_points.into(),
            win_streak: stats.win_streak.into(),
            mastered_words_count: stats.mastered_words_count.into(),
            login_days: stats.login_days.into(),
            gold: stats.gold.into(),
            last_login_day: stats.last_login_day.map(i64::from),
        }
    }
}

impl TryFrom<UserStatsRow> for PlayerStats {
    type Error = SchemaError;

    fn try_from(row: UserStatsRow) -> Result<Self, Self::Error> {
        let level = column("level", row.level)?;
        if level == 0 {
            return Err(SchemaError::ZeroLevel);
        }
        let exp = column("exp", row.exp)?;
        if u64::from(exp) >= u64::from(level) * 100 {
            return Err(SchemaError::ExpOverflow { exp, level });
        }
        let hp = column("hp", row.hp)?;
        let max_hp = column("max_hp", row.max_hp)?;
        if hp > max_hp {
            return Err(SchemaError::HpAboveMax { hp, max_hp });
        }
        if !(0.0..=1.0).contains(&row.crit) {
            return Err(SchemaError::CritOutOfRange(row.crit));
        }
        let stored_rank = Rank::from_label(&row.rank).ok_or_else(|| SchemaError::UnknownRank(row.rank.clone()))?;
        let rank_points = column("rank_points", row.rank_points)?;

        // The points decide the tier; a stale label is corrected on load
        let rank = tier_for_points(rank_points);
        if rank != stored_rank {
            log::debug!("{}: stored rank {} corrected to {}", row.user_id, stored_rank, rank);
        }

        Ok(PlayerStats {
            level,
            exp,
            atk: column("atk", row.atk)?,
            def: column("def", row.def)?,
            crit: row.crit,
            hp,
            max_hp,
            rank,
            rank_points,
            win_streak: column("win_streak", row.win_streak)?,
            mastered_words_count: column("mastered_words_count", row.mastered_words_count)?,
            login_days: column("login_days", row.login_days)?,
            gold: column("gold", row.gold)?,
            last_login_day: row.last_login_day.map(|day| column("last_login_day", day)).transpose()?,
        })
    }
}

/// One row of `shop_items`; a bonus column of 0 means the item has no such bonus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItemRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub price: i64,
    #[serde(default)]
    pub atk_bonus: i64,
    #[serde(default)]
    pub def_bonus: i64,
    #[serde(default)]
    pub hp_bonus: i64,
    #[serde(default)]
    pub asset_key: Option<String>,
}

fn bonus_column(name: &'static str, value: i64) -> Result<Option<u32>, SchemaError> {
    column(name, value).map(|v| (v > 0).then_some(v))
}

impl TryFrom<ShopItemRow> for ShopItem {
    type Error = SchemaError;

    fn try_from(row: ShopItemRow) -> Result<Self, Self::Error> {
        let item_type = ItemType::from_label(&row.item_type)
            .ok_or_else(|| SchemaError::UnknownItemType(row.item_type.clone()))?;
        let price = column("price", row.price)?;
        if price == 0 {
            return Err(SchemaError::ZeroPrice(row.id));
        }
        let stat_bonus = StatBonus {
            atk: bonus_column("atk_bonus", row.atk_bonus)?,
            def: bonus_column("def_bonus", row.def_bonus)?,
            hp: bonus_column("hp_bonus", row.hp_bonus)?,
        };

        let mut item = ShopItem::new(&row.id, &row.name, item_type, price, stat_bonus);
        if let Some(key) = row.asset_key {
            item.asset_key = key;
        }
        Ok(item)
    }
}

impl From<&ShopItem> for ShopItemRow {
    fn from(item: &ShopItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            item_type: item.item_type.name().to_string(),
            price: item.price.into(),
            atk_bonus: item.stat_bonus.atk().into(),
            def_bonus: item.stat_bonus.def().into(),
            hp_bonus: item.stat_bonus.hp().into(),
            asset_key: Some(item.asset_key.clone()),
        }
    }
}

/// One row of `user_equipment`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRow {
    pub weapon_id: Option<String>,
    pub armor_id: Option<String>,
    pub shield_id: Option<String>,
}

impl EquipmentRow {
    fn column(&self, slot: ItemType) -> Option<&String> {
        match slot {
            ItemType::Weapon => self.weapon_id.as_ref(),
            ItemType::Armor => self.armor_id.as_ref(),
            ItemType::Shield => self.shield_id.as_ref(),
        }
    }
}

impl From<&Equipment> for EquipmentRow {
    fn from(equipped: &Equipment) -> Self {
        let id = |slot| equipped.get(slot).map(str::to_string);
        Self {
            weapon_id: id(ItemType::Weapon),
            armor_id: id(ItemType::Armor),
            shield_id: id(ItemType::Shield),
        }
    }
}

impl From<&EquipmentRow> for Equipment {
    fn from(row: &EquipmentRow) -> Self {
        let mut equipped = Equipment::new();
        for slot in ItemType::all() {
            if let Some(id) = row.column(*slot) {
                equipped.set(*slot, id);
            }
        }
        equipped
    }
}
