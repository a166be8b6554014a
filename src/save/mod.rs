//! Save/load system
//!
//! Row shapes, the repository seam, the local JSON store and match history.

pub mod schema;
pub mod store;
pub mod history;

pub use schema::{EquipmentRow, SchemaError, ShopItemRow, UserStatsRow};
pub use store::{
    LeaderboardRow, LocalStore, Loadout, Repository, SaveError,
    save_directory,
};
pub use history::{HistoryPage, MatchRecord, HISTORY_PAGE_SIZE, paginate};
