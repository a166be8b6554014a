//! Player stats
//!
//! The canonical progression record of a player: level, experience,
//! combat stats, ladder standing and the counters that feed achievements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Experience required per level (threshold is `level * EXP_PER_LEVEL`)
pub const EXP_PER_LEVEL: u32 = 100;
/// Max HP gained on every level-up
pub const MAX_HP_PER_LEVEL: u32 = 10;
/// Crit chance gained per crit reward
pub const CRIT_STEP: f64 = 0.001;
/// Crit chance is a probability
pub const CRIT_CAP: f64 = 1.0;

/// Coarse ladder tier, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Legend,
}

impl Rank {
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
            Rank::Platinum => "Platinum",
            Rank::Diamond => "Diamond",
            Rank::Master => "Master",
            Rank::Legend => "Legend",
        }
    }

    /// Parse a stored rank label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Rank> {
        Rank::all()
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(label.trim()))
    }

    /// All tiers in ladder order
    pub fn all() -> &'static [Rank] {
        &[
            Rank::Bronze,
            Rank::Silver,
            Rank::Gold,
            Rank::Platinum,
            Rank::Diamond,
            Rank::Master,
            Rank::Legend,
        ]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stat that training can reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Atk,
    Def,
    Hp,
    Crit,
}

impl StatKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Atk => "ATK",
            StatKind::Def => "DEF",
            StatKind::Hp => "HP",
            StatKind::Crit => "CRIT",
        }
    }
}

/// Persistent player progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub level: u32,
    /// Experience into the current level, always below `level * 100`
    pub exp: u32,
    pub atk: u32,
    pub def: u32,
    /// Critical-hit probability in [0, 1]
    pub crit: f64,
    pub hp: u32,
    pub max_hp: u32,
    pub rank: Rank,
    pub rank_points: u32,
    pub win_streak: u32,
    pub mastered_words_count: u32,
    pub login_days: u32,
    pub gold: u32,
    /// Day number (days since the Unix epoch) of the last counted login
    #[serde(default)]
    pub last_login_day: Option<u32>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            level: 1,
            exp: 0,
            atk: 10,
            def: 10,
            crit: 0.05,
            hp: 100,
            max_hp: 100,
            rank: Rank::Bronze,
            rank_points: 0,
            win_streak: 0,
            mastered_words_count: 0,
            login_days: 0,
            gold: 0,
            last_login_day: None,
        }
    }
}

impl PlayerStats {
    /// Fresh account stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Experience needed to finish the current level
    pub fn exp_threshold(&self) -> u32 {
        self.level.saturating_mul(EXP_PER_LEVEL)
    }

    /// Pull every numeric field back inside its invariant range
    pub fn clamp(&mut self) {
        self.level = self.level.max(1);
        self.max_hp = self.max_hp.max(1);
        self.hp = self.hp.min(self.max_hp);
        if !self.crit.is_finite() {
            self.crit = 0.0;
        }
        self.crit = self.crit.clamp(0.0, CRIT_CAP);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Gear-inclusive stats the combat engine works with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub atk: u32,
    pub def: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub crit: f64,
}

impl From<&PlayerStats> for CombatStats {
    fn from(stats: &PlayerStats) -> Self {
        Self {
            atk: stats.atk,
            def: stats.def,
            hp: stats.hp,
            max_hp: stats.max_hp,
            crit: stats.crit,
        }
    }
}
