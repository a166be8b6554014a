//! Power score (KP)
//!
//! Leaderboard-only strength metric. It never feeds back into rank points
//! or tiers.

use crate::items::StatBonus;
use crate::player::PlayerStats;

pub const ATK_WEIGHT: u64 = 10;
pub const DEF_WEIGHT: u64 = 15;
pub const HP_WEIGHT: u64 = 2;
pub const LEVEL_WEIGHT: u64 = 100;

/// `atk*10 + def*15 + hp*2 + level*100`, with gear folded into atk/def/hp
pub fn power_score(stats: &PlayerStats, gear: &StatBonus) -> u64 {
    let atk = stats.atk as u64 + gear.atk() as u64;
    let def = stats.def as u64 + gear.def() as u64;
    let hp = stats.hp as u64 + gear.hp() as u64;
    atk * ATK_WEIGHT + def * DEF_WEIGHT + hp * HP_WEIGHT + stats.level as u64 * LEVEL_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_player() {
        // 10*10 + 10*15 + 100*2 + 1*100
        assert_eq!(power_score(&PlayerStats::default(), &StatBonus::default()), 550);
    }

    #[test]
    fn test_gear_counts() {
        let gear = StatBonus { atk: Some(5), def: Some(2), hp: Some(30) };
        assert_eq!(power_score(&PlayerStats::default(), &gear), 550 + 50 + 30 + 60);
    }

    #[test]
    fn test_level_dominates_small_gear() {
        let veteran = PlayerStats { level: 5, ..PlayerStats::default() };
        let geared = StatBonus { atk: Some(10), ..Default::default() };
        assert!(power_score(&veteran, &StatBonus::default()) > power_score(&PlayerStats::default(), &geared));
    }
}
