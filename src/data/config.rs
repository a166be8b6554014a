//! Game tuning
//!
//! Reward amounts and enemy presets. The progression and combat formulas
//! themselves are fixed; only what events pay out is tunable.

use serde::{Deserialize, Serialize};

/// Top-level tuning file (`config.ron`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rewards: RewardConfig,
    pub boss: EnemyPreset,
}

/// What each training or battle event pays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Exp for mastering a vocabulary word (also grants +1 ATK)
    pub word_mastered_exp: u32,
    /// Exp for winning a battle
    pub battle_win_exp: u32,
    /// Gold for winning a battle
    pub battle_win_gold: u32,
    /// Gold for the first login of a day
    pub daily_login_gold: u32,
    /// Length of a free-talk conversation; finishing it is worth 10 exp
    pub conversation_secs: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            word_mastered_exp: 5,
            battle_win_exp: 50,
            battle_win_gold: 20,
            daily_login_gold: 10,
            conversation_secs: 180,
        }
    }
}

/// A scripted opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyPreset {
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
}

impl Default for EnemyPreset {
    fn default() -> Self {
        Self {
            name: "Exam Ghost".to_string(),
            hp: 100,
            atk: 0,
            def: 0,
        }
    }
}
