//! Word Warrior - progression and combat core
//!
//! Learners train vocabulary and grammar, spend gold on gear, and fight
//! turn-based battles whose damage comes from how well they answer.

pub mod player;
pub mod progression;
pub mod items;
pub mod combat;
pub mod ranking;
pub mod data;
pub mod session;
pub mod save;
pub mod assess;

// Re-export commonly used types
pub use player::{PlayerStats, Profile, Rank, StatKind};
pub use combat::{Battle, BattleMode, MatchOutcome, MatchResult};
pub use data::DataManager;
pub use session::{Action, Session};
