//! Progression systems

pub mod xp;
pub mod achievements;

pub use xp::{apply_experience, conversation_exp, exp_to_next_level, level_progress, levels_gained};
pub use achievements::{Achievement, AchievementFilter, AchievementStatus, all_achievements, unlocked_set, evaluate};
