//! Persistence
//!
//! [`Repository`] is the seam toward whatever stores player data. The
//! bundled [`LocalStore`] keeps one JSON file per user in the platform data
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::history::{paginate, HistoryPage, MatchRecord};
use super::schema::{EquipmentRow, SchemaError, UserStatsRow};
use crate::combat::MatchResult;
use crate::items::{gear_bonus, Catalog, Equipment, Inventory};
use crate::player::PlayerStats;
use crate::ranking::LeaderboardEntry;

/// Save file version for compatibility checking
const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed save {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid save data: {0}")]
    Schema(#[from] SchemaError),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("no saved data for {0}")]
    NotFound(String),
    #[error("invalid user id {0:?}")]
    InvalidUserId(String),
}

/// Owned and equipped gear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loadout {
    pub inventory: Inventory,
    pub equipped: Equipment,
}

/// One player's data as needed for the leaderboards
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub stats: PlayerStats,
    pub equipped: Equipment,
}

impl LeaderboardRow {
    /// Resolve equipped gear against the catalog
    pub fn into_entry(self, catalog: &Catalog) -> LeaderboardEntry {
        let gear = gear_bonus(&self.equipped, catalog);
        LeaderboardEntry {
            username: self.user_id.clone(),
            user_id: self.user_id,
            stats: self.stats,
            gear,
        }
    }
}

/// Storage for player stats, gear and match history
pub trait Repository {
    /// Fails with [`SaveError::NotFound`] for a user with no saved stats
    fn load_stats(&self, user_id: &str) -> Result<PlayerStats, SaveError>;
    fn save_stats(&self, user_id: &str, stats: &PlayerStats) -> Result<(), SaveError>;

    /// A user who never saved gear has an empty loadout
    fn load_loadout(&self, user_id: &str) -> Result<Loadout, SaveError>;
    fn save_loadout(&self, user_id: &str, loadout: &Loadout) -> Result<(), SaveError>;

    /// Append a finished match and return the stored record
    fn append_match(&self, user_id: &str, opponent: &str, result: &MatchResult) -> Result<MatchRecord, SaveError>;
    /// Page `page` of the user's matches, newest first
    fn match_history(&self, user_id: &str, page: usize) -> Result<HistoryPage, SaveError>;

    fn leaderboard_rows(&self) -> Result<Vec<LeaderboardRow>, SaveError>;
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "wordwarrior", "WordWarrior") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("users");
        path
    } else {
        // Fallback to current directory
        PathBuf::from("./users")
    }
}

/// Everything stored for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserFile {
    version: u32,
    #[serde(default)]
    stats: Option<UserStatsRow>,
    #[serde(default)]
    inventory: Vec<String>,
    #[serde(default)]
    equipment: EquipmentRow,
    #[serde(default)]
    history: Vec<MatchRecord>,
}

impl Default for UserFile {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            stats: None,
            inventory: Vec::new(),
            equipment: EquipmentRow::default(),
            history: Vec::new(),
        }
    }
}

/// JSON files on local disk, one per user
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
    // Serializes read-modify-write of user files
    write_lock: Mutex<()>,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::with_root(save_directory())
    }
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_path(&self, user_id: &str) -> Result<PathBuf, SaveError> {
        let valid = !user_id.is_empty()
            && user_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SaveError::InvalidUserId(user_id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", user_id)))
    }

    fn read_path(path: &Path) -> Result<Option<UserFile>, SaveError> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: UserFile = serde_json::from_str(&data).map_err(|source| SaveError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if file.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: file.version,
            });
        }
        Ok(Some(file))
    }

    fn read(&self, user_id: &str) -> Result<Option<UserFile>, SaveError> {
        Self::read_path(&self.user_path(user_id)?)
    }

    fn write(&self, user_id: &str, file: &UserFile) -> Result<(), SaveError> {
        let path = self.user_path(user_id)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| SaveError::Io { path, source }
        };

        fs::create_dir_all(&self.root).map_err(io_err(&self.root))?;
        let json = serde_json::to_string_pretty(file).map_err(|source| SaveError::Json {
            path: path.clone(),
            source,
        })?;

        // Atomic replace
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        Ok(())
    }

    fn update<T>(&self, user_id: &str, f: impl FnOnce(&mut UserFile) -> T) -> Result<T, SaveError> {
        let _guard = self.write_lock.lock();
        let mut file = self.read(user_id)?.unwrap_or_default();
        let out = f(&mut file);
        self.write(user_id, &file)?;
        Ok(out)
    }
}

impl Repository for LocalStore {
    fn load_stats(&self, user_id: &str) -> Result<PlayerStats, SaveError> {
        let row = self
            .read(user_id)?
            .and_then(|file| file.stats)
            .ok_or_else(|| SaveError::NotFound(user_id.to_string()))?;
        Ok(PlayerStats::try_from(row)?)
    }

    fn save_stats(&self, user_id: &str, stats: &PlayerStats) -> Result<(), SaveError> {
        let row = UserStatsRow::from_stats(user_id, stats);
        self.update(user_id, |file| file.stats = Some(row))?;
        log::info!("Saved stats for {}", user_id);
        Ok(())
    }

    fn load_loadout(&self, user_id: &str) -> Result<Loadout, SaveError> {
        let Some(file) = self.read(user_id)? else {
            return Ok(Loadout::default());
        };
        Ok(Loadout {
            inventory: file.inventory.into_iter().collect(),
            equipped: Equipment::from(&file.equipment),
        })
    }

    fn save_loadout(&self, user_id: &str, loadout: &Loadout) -> Result<(), SaveError> {
        let inventory: Vec<String> = loadout.inventory.iter().map(str::to_string).collect();
        let equipment = EquipmentRow::from(&loadout.equipped);
        self.update(user_id, |file| {
            file.inventory = inventory;
            file.equipment = equipment;
        })
    }

    fn append_match(&self, user_id: &str, opponent: &str, result: &MatchResult) -> Result<MatchRecord, SaveError> {
        self.update(user_id, |file| {
            let record = MatchRecord {
                seq: file.history.len() as u64 + 1,
                opponent: opponent.to_string(),
                result: result.clone(),
            };
            file.history.push(record.clone());
            record
        })
    }

    fn match_history(&self, user_id: &str, page: usize) -> Result<HistoryPage, SaveError> {
        let history = self.read(user_id)?.map(|file| file.history).unwrap_or_default();
        Ok(paginate(&history, page))
    }

    fn leaderboard_rows(&self) -> Result<Vec<LeaderboardRow>, SaveError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|source| SaveError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut rows = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(user_id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            // One bad file should not take the whole board down
            let file = match Self::read_path(&path) {
                Ok(Some(file)) => file,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("Skipping {} on leaderboard: {}", user_id, e);
                    continue;
                }
            };
            let Some(row) = file.stats else { continue };
            match PlayerStats::try_from(row) {
                Ok(stats) => rows.push(LeaderboardRow {
                    user_id,
                    stats,
                    equipped: Equipment::from(&file.equipment),
                }),
                Err(e) => log::warn!("Skipping {} on leaderboard: {}", user_id, e),
            }
        }

        rows.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{BattleMode, MatchOutcome};
    use crate::data::DataManager;
    use crate::items::ItemType;
    use crate::player::Rank;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::with_root(dir.path().join("users"));
        (dir, store)
    }

    #[test]
    fn test_missing_user() {
        let (_dir, store) = store();
        assert!(matches!(store.load_stats("nobody"), Err(SaveError::NotFound(_))));
        assert_eq!(store.load_loadout("nobody").unwrap(), Loadout::default());
        assert!(store.match_history("nobody", 0).unwrap().records.is_empty());
        assert!(store.leaderboard_rows().unwrap().is_empty());
    }

    #[test]
    fn test_stats_and_loadout_persist() {
        let (_dir, store) = store();
        let stats = PlayerStats {
            level: 3,
            gold: 75,
            rank_points: 11,
            rank: Rank::Silver,
            ..PlayerStats::default()
        };
        store.save_stats("alice", &stats).unwrap();

        let mut equipped = Equipment::new();
        equipped.set(ItemType::Weapon, "wooden_sword");
        let loadout = Loadout {
            inventory: ["wooden_sword".to_string()].into_iter().collect(),
            equipped,
        };
        store.save_loadout("alice", &loadout).unwrap();

        // Saving the loadout keeps the stats and vice versa
        assert_eq!(store.load_stats("alice").unwrap(), stats);
        assert_eq!(store.load_loadout("alice").unwrap(), loadout);
    }

    #[test]
    fn test_history_appends() {
        let (_dir, store) = store();
        for i in 0..12 {
            let outcome = if i % 2 == 0 { MatchOutcome::Win } else { MatchOutcome::Loss };
            let record = store
                .append_match("bob", "Exam Ghost", &MatchResult::new(BattleMode::Boss, outcome))
                .unwrap();
            assert_eq!(record.seq, i + 1);
        }

        let first = store.match_history("bob", 0).unwrap();
        assert_eq!(first.records.len(), 10);
        assert_eq!(first.records[0].seq, 12);
        assert!(first.has_more);
        assert_eq!(store.match_history("bob", 1).unwrap().records.len(), 2);
    }

    #[test]
    fn test_history_keeps_match_score() {
        let (_dir, store) = store();
        let result = MatchResult {
            score: Some(88),
            score_change: Some(1),
            ..MatchResult::new(BattleMode::Blitz, MatchOutcome::Win)
        };
        store.append_match("carol", "Rival", &result).unwrap();

        let history = store.match_history("carol", 0).unwrap();
        assert_eq!(history.records[0].result, result);
        assert_eq!(history.records[0].result.score, Some(88));
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let (_dir, store) = store();
        assert!(matches!(
            store.save_stats("../evil", &PlayerStats::default()),
            Err(SaveError::InvalidUserId(_))
        ));
        assert!(matches!(store.load_stats(""), Err(SaveError::InvalidUserId(_))));
    }

    #[test]
    fn test_corrupt_file() {
        let (_dir, store) = store();
        store.save_stats("carol", &PlayerStats::default()).unwrap();
        fs::write(store.root().join("carol.json"), "{ nope").unwrap();
        assert!(matches!(store.load_stats("carol"), Err(SaveError::Json { .. })));

        fs::write(store.root().join("carol.json"), r#"{"version": 99}"#).unwrap();
        assert!(matches!(
            store.load_stats("carol"),
            Err(SaveError::VersionMismatch { expected: 1, found: 99 })
        ));
    }

    #[test]
    fn test_leaderboard_rows() {
        let (_dir, store) = store();
        let data = DataManager::default();
        store
            .save_stats("zed", &PlayerStats { rank_points: 30, ..PlayerStats::default() })
            .unwrap();
        store.save_stats("amy", &PlayerStats::default()).unwrap();
        let mut equipped = Equipment::new();
        equipped.set(ItemType::Shield, "iron_shield");
        store
            .save_loadout("amy", &Loadout { inventory: Inventory::new(), equipped })
            .unwrap();
        fs::write(store.root().join("broken.json"), "garbage").unwrap();

        let rows = store.leaderboard_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, "amy");
        assert_eq!(rows[1].stats.rank, Rank::Gold);

        let entry = rows[0].clone().into_entry(&data.catalog);
        assert_eq!(entry.gear.def(), 7);
    }
}
