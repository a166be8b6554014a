//! Built-in shop catalog, used when `shop.ron` is absent

use crate::items::{ItemType, ShopItem, StatBonus};

fn atk(n: u32) -> StatBonus {
    StatBonus { atk: Some(n), ..Default::default() }
}

fn def(n: u32) -> StatBonus {
    StatBonus { def: Some(n), ..Default::default() }
}

fn hp(n: u32) -> StatBonus {
    StatBonus { hp: Some(n), ..Default::default() }
}

/// Default catalog entries
pub fn default_shop_items() -> Vec<ShopItem> {
    vec![
        // Weapons
        ShopItem::new("wooden_sword", "Wooden Sword", ItemType::Weapon, 50, atk(2)),
        ShopItem::new("iron_sword", "Iron Sword", ItemType::Weapon, 150, atk(5)),
        ShopItem::new("steel_blade", "Steel Blade", ItemType::Weapon, 400, atk(10)),
        // Armor
        ShopItem::new("leather_armor", "Leather Armor", ItemType::Armor, 80, hp(20)),
        ShopItem::new("chain_mail", "Chain Mail", ItemType::Armor, 250, StatBonus { def: Some(2), hp: Some(50), atk: None }),
        ShopItem::new("plate_armor", "Plate Armor", ItemType::Armor, 600, StatBonus { def: Some(5), hp: Some(100), atk: None }),
        // Shields
        ShopItem::new("wooden_shield", "Wooden Shield", ItemType::Shield, 60, def(3)),
        ShopItem::new("iron_shield", "Iron Shield", ItemType::Shield, 200, def(7)),
        ShopItem::new("tower_shield", "Tower Shield", ItemType::Shield, 500, def(12)),
    ]
}
