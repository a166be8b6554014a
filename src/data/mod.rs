//! Game data: shop catalog and tuning, loaded from RON

pub mod config;
pub mod loader;
pub mod shop;

pub use config::{GameConfig, RewardConfig, EnemyPreset};
pub use loader::{DataManager, DataError, load_ron, DATA_DIR};
pub use shop::default_shop_items;
