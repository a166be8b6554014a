//! Player session
//!
//! Owns one player's profile. Every change goes through
//! [`Session::dispatch`], which holds the lock for the whole
//! read-reduce-write so concurrent events never work from a stale copy.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use super::action::{apply_action, Action, ActionError, Report};
use crate::combat::{Battle, BattleMode, Combatant, MatchResult};
use crate::data::{DataManager, GameConfig};
use crate::items::Catalog;
use crate::player::{CombatStats, Profile};
use crate::save::{Loadout, Repository, SaveError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

pub struct Session {
    user_id: String,
    profile: Mutex<Profile>,
    catalog: Arc<Catalog>,
    config: Arc<GameConfig>,
}

impl Session {
    pub fn new(user_id: &str, profile: Profile, catalog: Arc<Catalog>, config: Arc<GameConfig>) -> Self {
        Self {
            user_id: user_id.to_string(),
            profile: Mutex::new(profile),
            catalog,
            config,
        }
    }

    pub fn with_data(user_id: &str, profile: Profile, data: &DataManager) -> Self {
        Self::new(user_id, profile, Arc::new(data.catalog.clone()), Arc::new(data.config.clone()))
    }

    /// Load a player's saved profile, starting fresh if nothing is stored yet
    pub fn load(
        repo: &dyn Repository,
        user_id: &str,
        catalog: Arc<Catalog>,
        config: Arc<GameConfig>,
    ) -> Result<Self, SaveError> {
        let stats = match repo.load_stats(user_id) {
            Ok(stats) => stats,
            Err(SaveError::NotFound(_)) => {
                log::info!("Creating new profile for {}", user_id);
                Default::default()
            }
            Err(e) => return Err(e),
        };
        let Loadout { inventory, equipped } = repo.load_loadout(user_id)?;
        Ok(Self::new(user_id, Profile::new(stats, inventory, equipped), catalog, config))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply an action. On error the profile is unchanged.
    pub fn dispatch(&self, action: Action) -> Result<Report, ActionError> {
        let mut profile = self.profile.lock();
        let applied = apply_action(&profile, &self.catalog, &self.config, action)?;
        *profile = applied.profile;
        Ok(applied.report)
    }

    pub fn snapshot(&self) -> Profile {
        self.profile.lock().clone()
    }

    pub fn combat_stats(&self) -> CombatStats {
        self.profile.lock().combat_stats(&self.catalog)
    }

    fn player_combatant(&self) -> Combatant {
        Combatant::from_stats(&self.user_id, &self.combat_stats())
    }

    /// Start a fight against the configured boss
    pub fn boss_battle(&self) -> Battle {
        let boss = &self.config.boss;
        let enemy = Combatant::new(&boss.name, boss.hp, boss.atk, boss.def);
        Battle::new(BattleMode::Boss, self.player_combatant(), enemy)
    }

    /// Start a fight against another player
    pub fn pvp_battle(&self, mode: BattleMode, opponent: Combatant) -> Battle {
        Battle::new(mode, self.player_combatant(), opponent)
    }

    /// Apply a finished match and persist it. The profile is saved before
    /// the match is added to history, so a failed save leaves no record of
    /// a match whose rewards were lost.
    pub fn finish_match(
        &self,
        repo: &dyn Repository,
        opponent: &str,
        result: MatchResult,
    ) -> Result<Report, SessionError> {
        let report = self.dispatch(Action::MatchFinished(result))?;
        self.save(repo)?;
        if let Some(result) = &report.match_result {
            repo.append_match(&self.user_id, opponent, result)?;
        }
        Ok(report)
    }

    /// Write the current profile through a repository
    pub fn save(&self, repo: &dyn Repository) -> Result<(), SaveError> {
        let profile = self.snapshot();
        repo.save_stats(&self.user_id, &profile.stats)?;
        repo.save_loadout(
            &self.user_id,
            &Loadout {
                inventory: profile.inventory,
                equipped: profile.equipped,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{BattlePhase, EnemyMove, MatchOutcome};
    use crate::items::{ItemType, ShopError};
    use crate::player::PlayerStats;
    use crate::save::{HistoryPage, LeaderboardRow, LocalStore, MatchRecord};
    use std::thread;

    /// Reads and appends through a real store, but every profile write fails
    struct FullDisk(LocalStore);

    impl Repository for FullDisk {
        fn load_stats(&self, user_id: &str) -> Result<PlayerStats, SaveError> {
            self.0.load_stats(user_id)
        }
        fn save_stats(&self, user_id: &str, _stats: &PlayerStats) -> Result<(), SaveError> {
            Err(SaveError::Io {
                path: self.0.root().join(user_id),
                source: std::io::Error::new(std::io::ErrorKind::Other, "no space left"),
            })
        }
        fn load_loadout(&self, user_id: &str) -> Result<Loadout, SaveError> {
            self.0.load_loadout(user_id)
        }
        fn save_loadout(&self, user_id: &str, loadout: &Loadout) -> Result<(), SaveError> {
            self.0.save_loadout(user_id, loadout)
        }
        fn append_match(&self, user_id: &str, opponent: &str, result: &MatchResult) -> Result<MatchRecord, SaveError> {
            self.0.append_match(user_id, opponent, result)
        }
        fn match_history(&self, user_id: &str, page: usize) -> Result<HistoryPage, SaveError> {
            self.0.match_history(user_id, page)
        }
        fn leaderboard_rows(&self) -> Result<Vec<LeaderboardRow>, SaveError> {
            self.0.leaderboard_rows()
        }
    }

    fn session() -> Session {
        Session::with_data("tester", Profile::default(), &DataManager::default())
    }

    #[test]
    fn test_concurrent_rewards_all_land() {
        let session = Arc::new(session());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    for _ in 0..50 {
                        session.dispatch(Action::GoldAwarded(1)).unwrap();
                        session.dispatch(Action::WordMastered).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = session.snapshot().stats;
        assert_eq!(stats.gold, 400);
        assert_eq!(stats.mastered_words_count, 400);
        assert_eq!(stats.atk, 410);
        // 400 words * 5 exp = 2000 exp: levels 1..=5 need 100+200+300+400+500
        assert_eq!(stats.level, 6);
        assert_eq!(stats.exp, 500);
    }

    #[test]
    fn test_failed_action_keeps_profile() {
        let session = session();
        session.dispatch(Action::GoldAwarded(30)).unwrap();
        let before = session.snapshot();

        let err = session.dispatch(Action::Purchase("wooden_sword".into())).unwrap_err();
        assert_eq!(err, ActionError::Shop(ShopError::InsufficientGold { price: 50, gold: 30 }));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_gear_reaches_battle() {
        let session = session();
        session.dispatch(Action::GoldAwarded(60)).unwrap();
        session.dispatch(Action::Purchase("wooden_shield".into())).unwrap();
        session
            .dispatch(Action::Equip { slot: ItemType::Shield, item_id: "wooden_shield".into() })
            .unwrap();

        let battle = session.boss_battle();
        assert_eq!(battle.player().def, 13);
        assert_eq!(battle.enemy().name, "Exam Ghost");
        assert_eq!(battle.phase(), BattlePhase::AwaitingPlayerAction);
    }

    #[test]
    fn test_boss_fight_to_profile() {
        let session = session();
        let mut battle = session.boss_battle();
        while !battle.is_over() {
            let ticket = battle.begin_player_turn().unwrap();
            battle.resolve_player_turn(ticket, 100.0).unwrap();
            if !battle.is_over() {
                battle.resolve_enemy_turn(EnemyMove::Strike(10)).unwrap();
            }
        }
        let result = battle.match_result().unwrap();
        assert_eq!(result.outcome, MatchOutcome::Win);

        let report = session.dispatch(Action::MatchFinished(result)).unwrap();
        assert_eq!(report.match_result.unwrap().score_change, Some(1));
        assert_eq!(session.snapshot().stats.gold, 20);
    }

    #[test]
    fn test_finish_match_saves_then_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::with_root(dir.path());
        let session = session();

        let report = session
            .finish_match(&store, "Exam Ghost", MatchResult::new(BattleMode::Boss, MatchOutcome::Win))
            .unwrap();
        assert_eq!(report.match_result.unwrap().score_change, Some(1));
        assert_eq!(store.load_stats("tester").unwrap().rank_points, 1);
        assert_eq!(store.match_history("tester", 0).unwrap().records.len(), 1);
    }

    #[test]
    fn test_failed_save_leaves_no_history() {
        let dir = tempfile::tempdir().unwrap();
        let disk = FullDisk(LocalStore::with_root(dir.path()));
        let session = session();

        let err = session
            .finish_match(&disk, "Exam Ghost", MatchResult::new(BattleMode::Boss, MatchOutcome::Win))
            .unwrap_err();
        assert!(matches!(err, SessionError::Save(SaveError::Io { .. })));
        assert!(disk.match_history("tester", 0).unwrap().records.is_empty());
        assert!(matches!(disk.load_stats("tester"), Err(SaveError::NotFound(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::with_root(dir.path());
        let data = DataManager::default();
        let catalog = Arc::new(data.catalog.clone());
        let config = Arc::new(data.config.clone());

        let fresh = Session::load(&store, "dana", catalog.clone(), config.clone()).unwrap();
        assert_eq!(fresh.snapshot(), Profile::default());

        fresh.dispatch(Action::GoldAwarded(100)).unwrap();
        fresh.dispatch(Action::Purchase("wooden_sword".into())).unwrap();
        fresh
            .dispatch(Action::Equip { slot: ItemType::Weapon, item_id: "wooden_sword".into() })
            .unwrap();
        fresh.save(&store).unwrap();

        let loaded = Session::load(&store, "dana", catalog, config).unwrap();
        assert_eq!(loaded.snapshot(), fresh.snapshot());
        assert_eq!(loaded.combat_stats().atk, 12);
    }
}
