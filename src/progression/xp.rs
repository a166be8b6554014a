//! Experience and leveling
//!
//! Experience gain, level-up cascades and training stat rewards.

use crate::player::stats::{PlayerStats, StatKind, CRIT_CAP, CRIT_STEP, EXP_PER_LEVEL, MAX_HP_PER_LEVEL};

/// Exp for a conversation held to the end
const CONVERSATION_MAX_EXP: u32 = 10;

/// Experience needed to clear a given level
pub fn exp_to_next_level(level: u32) -> u32 {
    level.max(1).saturating_mul(EXP_PER_LEVEL)
}

/// Fraction of the current level's bar that is filled (0.0 - 1.0)
pub fn level_progress(stats: &PlayerStats) -> f64 {
    let needed = exp_to_next_level(stats.level);
    (stats.exp as f64 / needed as f64).clamp(0.0, 1.0)
}

/// Add experience, resolving every level-up it triggers, then apply the
/// optional stat reward.
///
/// Each level-up raises max HP by 10 and fully heals. The threshold is
/// re-evaluated against the new level on every iteration, so a large gain
/// can cascade through several levels.
pub fn apply_experience(stats: &PlayerStats, amount: u32, reward: Option<StatKind>) -> PlayerStats {
    let mut next = stats.clone();
    next.exp = next.exp.saturating_add(amount);

    while next.exp >= exp_to_next_level(next.level) {
        next.exp -= exp_to_next_level(next.level);
        next.level += 1;
        next.max_hp = next.max_hp.saturating_add(MAX_HP_PER_LEVEL);
        next.hp = next.max_hp;
    }

    if let Some(stat) = reward {
        apply_stat_reward(&mut next, stat);
    }

    next
}

/// Experience for a timed conversation: one point per tenth of the full
/// duration completed, so a finished conversation is worth 10.
pub fn conversation_exp(elapsed_secs: u32, duration_secs: u32) -> u32 {
    if duration_secs == 0 {
        return CONVERSATION_MAX_EXP;
    }
    let elapsed = u64::from(elapsed_secs.min(duration_secs));
    (elapsed * u64::from(CONVERSATION_MAX_EXP) / u64::from(duration_secs)) as u32
}

/// Number of levels gained between two snapshots
pub fn levels_gained(before: &PlayerStats, after: &PlayerStats) -> u32 {
    after.level.saturating_sub(before.level)
}

fn apply_stat_reward(stats: &mut PlayerStats, stat: StatKind) {
    match stat {
        StatKind::Atk => stats.atk = stats.atk.saturating_add(1),
        StatKind::Def => stats.def = stats.def.saturating_add(1),
        StatKind::Hp => {
            // Grow the pool with the current value so hp never passes max_hp
            stats.max_hp = stats.max_hp.saturating_add(1);
            stats.hp = stats.hp.saturating_add(1).min(stats.max_hp);
        }
        StatKind::Crit => stats.crit = (stats.crit + CRIT_STEP).min(CRIT_CAP),
    }
}
