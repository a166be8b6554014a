//! Match results

use serde::{Deserialize, Serialize};

/// Battle flavour; decides which damage model each side uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleMode {
    /// PvE speech duel: player is skill-scored, the boss rolls strikes
    Boss,
    /// PvP quiz race: both sides are skill-scored
    Blitz,
    /// PvP grammar duel: player is skill-scored, incoming damage is mitigated by defense
    Tactics,
}

impl BattleMode {
    pub fn name(&self) -> &'static str {
        match self {
            BattleMode::Boss => "boss",
            BattleMode::Blitz => "blitz",
            BattleMode::Tactics => "tactics",
        }
    }

    pub fn is_pvp(&self) -> bool {
        !matches!(self, BattleMode::Boss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

/// Produced once per battle, consumed by ranking and progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub mode: BattleMode,
    pub outcome: MatchOutcome,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    /// Average skill score (0-100) over the player's resolved turns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    /// Rank-point delta, filled in once the ladder has been updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_change: Option<i32>,
}

impl MatchResult {
    pub fn new(mode: BattleMode, outcome: MatchOutcome) -> Self {
        Self {
            mode,
            outcome,
            damage_dealt: 0,
            damage_taken: 0,
            score: None,
            score_change: None,
        }
    }
}
