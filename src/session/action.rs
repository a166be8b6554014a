//! Profile reducer
//!
//! Every change to a player's profile is an [`Action`] applied by
//! [`apply_action`]. The reducer is pure: it reads one profile and returns
//! the next, or an error and no change at all.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::combat::{MatchOutcome, MatchResult};
use crate::data::GameConfig;
use crate::items::{self, Catalog, ItemId, ItemType, ShopError};
use crate::player::{Profile, StatKind};
use crate::progression::{all_achievements, apply_experience, conversation_exp, levels_gained, unlocked_set};
use crate::ranking::{apply_match_result, RankChange};

/// Something that happened to the player
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A vocabulary word crossed the mastery threshold
    WordMastered,
    /// A grammar/listening/skill exercise was passed
    TrainingSucceeded { exp: u32, stat: Option<StatKind> },
    /// A free-talk conversation ended after `elapsed_secs`
    ConversationFinished { elapsed_secs: u32 },
    /// A battle ended
    MatchFinished(MatchResult),
    GoldAwarded(u32),
    /// The player opened the app on `day` (days since the Unix epoch).
    /// Only the first login of each day counts.
    DailyLogin { day: u32 },
    Purchase(ItemId),
    Equip { slot: ItemType, item_id: ItemId },
    Unequip(ItemType),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Shop(#[from] ShopError),
}

/// Side information about an applied action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub levels_gained: u32,
    pub rank_change: Option<RankChange>,
    /// Finished match with its `score_change` filled in, ready for history
    pub match_result: Option<MatchResult>,
    /// Achievements that became true with this action
    pub newly_unlocked: Vec<&'static str>,
}

/// Result of a successful action
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub profile: Profile,
    pub report: Report,
}

/// Apply one action to a profile
pub fn apply_action(
    profile: &Profile,
    catalog: &Catalog,
    config: &GameConfig,
    action: Action,
) -> Result<Applied, ActionError> {
    let rewards = &config.rewards;
    let mut report = Report::default();

    let next = match action {
        Action::WordMastered => {
            let mut next = profile.clone();
            next.stats = apply_experience(&profile.stats, rewards.word_mastered_exp, Some(StatKind::Atk));
            next.stats.mastered_words_count = next.stats.mastered_words_count.saturating_add(1);
            next
        }
        Action::TrainingSucceeded { exp, stat } => {
            let mut next = profile.clone();
            next.stats = apply_experience(&profile.stats, exp, stat);
            next
        }
        Action::ConversationFinished { elapsed_secs } => {
            let mut next = profile.clone();
            let exp = conversation_exp(elapsed_secs, rewards.conversation_secs);
            next.stats = apply_experience(&profile.stats, exp, None);
            next
        }
        Action::MatchFinished(mut result) => {
            let mut next = profile.clone();
            let (mut stats, change) = apply_match_result(&profile.stats, result.outcome);
            if result.outcome == MatchOutcome::Win {
                stats = apply_experience(&stats, rewards.battle_win_exp, None);
                stats.gold = stats.gold.saturating_add(rewards.battle_win_gold);
            }
            next.stats = stats;

            result.score_change = Some(change.points_delta);
            report.rank_change = Some(change);
            report.match_result = Some(result);
            next
        }
        Action::GoldAwarded(amount) => {
            let mut next = profile.clone();
            next.stats.gold = next.stats.gold.saturating_add(amount);
            next
        }
        Action::DailyLogin { day } => {
            let mut next = profile.clone();
            if profile.stats.last_login_day.is_some_and(|last| day <= last) {
                log::debug!("Login on day {} already counted", day);
            } else {
                next.stats.login_days = next.stats.login_days.saturating_add(1);
                next.stats.gold = next.stats.gold.saturating_add(rewards.daily_login_gold);
                next.stats.last_login_day = Some(day);
            }
            next
        }
        Action::Purchase(item_id) => items::purchase(profile, catalog, &item_id)?,
        Action::Equip { slot, item_id } => items::equip(profile, catalog, slot, &item_id)?,
        Action::Unequip(slot) => items::unequip(profile, slot),
    };

    report.levels_gained = levels_gained(&profile.stats, &next.stats);
    if report.levels_gained > 0 {
        log::info!("Level up! Now level {}", next.stats.level);
    }

    let before: BTreeSet<_> = unlocked_set(&profile.stats, all_achievements());
    report.newly_unlocked = unlocked_set(&next.stats, all_achievements())
        .difference(&before)
        .copied()
        .collect();
    for id in &report.newly_unlocked {
        log::info!("Achievement unlocked: {}", id);
    }

    Ok(Applied { profile: next, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::BattleMode;
    use crate::data::DataManager;
    use crate::player::{PlayerStats, Rank};

    fn apply(profile: &Profile, action: Action) -> Result<Applied, ActionError> {
        let data = DataManager::default();
        apply_action(profile, &data.catalog, &data.config, action)
    }

    #[test]
    fn test_word_mastered() {
        let applied = apply(&Profile::default(), Action::WordMastered).unwrap();
        let stats = &applied.profile.stats;
        assert_eq!(stats.exp, 5);
        assert_eq!(stats.atk, 11);
        assert_eq!(stats.mastered_words_count, 1);
        assert_eq!(applied.report.newly_unlocked, vec!["word_1"]);
    }

    #[test]
    fn test_training_levels_up() {
        let profile = Profile {
            stats: PlayerStats { exp: 90, ..PlayerStats::default() },
            ..Profile::default()
        };
        let applied = apply(&profile, Action::TrainingSucceeded { exp: 50, stat: Some(StatKind::Def) }).unwrap();
        assert_eq!(applied.report.levels_gained, 1);
        assert_eq!(applied.profile.stats.level, 2);
        assert_eq!(applied.profile.stats.exp, 40);
        assert_eq!(applied.profile.stats.def, 11);
        assert_eq!(applied.profile.stats.hp, 110);
    }

    #[test]
    fn test_win_pays_out() {
        let result = MatchResult::new(BattleMode::Boss, MatchOutcome::Win);
        let applied = apply(&Profile::default(), Action::MatchFinished(result)).unwrap();
        let stats = &applied.profile.stats;
        assert_eq!(stats.rank_points, 1);
        assert_eq!(stats.win_streak, 1);
        assert_eq!(stats.exp, 50);
        assert_eq!(stats.gold, 20);
        assert_eq!(applied.report.match_result.unwrap().score_change, Some(1));
    }

    #[test]
    fn test_loss_pays_nothing() {
        let profile = Profile {
            stats: PlayerStats {
                rank: Rank::Silver,
                rank_points: 12,
                win_streak: 5,
                ..PlayerStats::default()
            },
            ..Profile::default()
        };
        let result = MatchResult::new(BattleMode::Tactics, MatchOutcome::Loss);
        let applied = apply(&profile, Action::MatchFinished(result)).unwrap();
        assert_eq!(applied.profile.stats.rank_points, 11);
        assert_eq!(applied.profile.stats.win_streak, 0);
        assert_eq!(applied.profile.stats.exp, 0);
        assert_eq!(applied.report.match_result.unwrap().score_change, Some(-1));
    }

    #[test]
    fn test_shop_actions() {
        let broke = Profile::default();
        assert!(matches!(
            apply(&broke, Action::Purchase("wooden_sword".into())),
            Err(ActionError::Shop(ShopError::InsufficientGold { .. }))
        ));

        let rich = apply(&broke, Action::GoldAwarded(100)).unwrap().profile;
        let bought = apply(&rich, Action::Purchase("wooden_sword".into())).unwrap().profile;
        assert_eq!(bought.stats.gold, 50);

        let equipped = apply(
            &bought,
            Action::Equip { slot: ItemType::Weapon, item_id: "wooden_sword".into() },
        )
        .unwrap()
        .profile;
        assert_eq!(equipped.combat_stats(&DataManager::default().catalog).atk, 12);

        let bare = apply(&equipped, Action::Unequip(ItemType::Weapon)).unwrap().profile;
        assert!(bare.equipped.is_empty(ItemType::Weapon));
    }

    #[test]
    fn test_daily_login() {
        let applied = apply(&Profile::default(), Action::DailyLogin { day: 20_000 }).unwrap();
        assert_eq!(applied.profile.stats.login_days, 1);
        assert_eq!(applied.profile.stats.gold, 10);
        assert_eq!(applied.profile.stats.last_login_day, Some(20_000));
    }

    #[test]
    fn test_daily_login_counts_once_per_day() {
        let mut profile = Profile::default();
        for _ in 0..5 {
            profile = apply(&profile, Action::DailyLogin { day: 20_000 }).unwrap().profile;
        }
        assert_eq!(profile.stats.login_days, 1);
        assert_eq!(profile.stats.gold, 10);

        // A clock that went backwards pays nothing either
        let earlier = apply(&profile, Action::DailyLogin { day: 19_999 }).unwrap().profile;
        assert_eq!(earlier, profile);

        let next_day = apply(&profile, Action::DailyLogin { day: 20_001 }).unwrap().profile;
        assert_eq!(next_day.stats.login_days, 2);
        assert_eq!(next_day.stats.gold, 20);
        assert_eq!(next_day.stats.last_login_day, Some(20_001));
    }

    #[test]
    fn test_conversation_finished() {
        let full = apply(&Profile::default(), Action::ConversationFinished { elapsed_secs: 180 }).unwrap();
        assert_eq!(full.profile.stats.exp, 10);
        assert_eq!(full.profile.stats.atk, 10);

        let half = apply(&Profile::default(), Action::ConversationFinished { elapsed_secs: 90 }).unwrap();
        assert_eq!(half.profile.stats.exp, 5);

        let profile = Profile {
            stats: PlayerStats { exp: 95, ..PlayerStats::default() },
            ..Profile::default()
        };
        let applied = apply(&profile, Action::ConversationFinished { elapsed_secs: 600 }).unwrap();
        assert_eq!(applied.report.levels_gained, 1);
        assert_eq!(applied.profile.stats.exp, 5);
    }
}
