//! Leaderboards
//!
//! Sorted views over many players' stats: by rank points, by power score,
//! or by mastered words.

use serde::{Deserialize, Serialize};

use super::power::power_score;
use crate::items::StatBonus;
use crate::player::{PlayerStats, Rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardKind {
    #[default]
    RankPoints,
    Power,
    Words,
}

/// One player's input row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub stats: PlayerStats,
    #[serde(default)]
    pub gear: StatBonus,
}

/// A placed row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based
    pub position: usize,
    pub user_id: String,
    pub username: String,
    pub title: Rank,
    pub level: u32,
    pub win_streak: u32,
    /// The value the board is sorted by
    pub value: u64,
}

impl LeaderboardKind {
    fn value(&self, entry: &LeaderboardEntry) -> u64 {
        match self {
            LeaderboardKind::RankPoints => entry.stats.rank_points as u64,
            LeaderboardKind::Power => power_score(&entry.stats, &entry.gear),
            LeaderboardKind::Words => entry.stats.mastered_words_count as u64,
        }
    }
}

/// Sort entries descending by the board's value and keep the top `limit`.
/// Ties fall back to user id so the order is stable.
pub fn build(entries: &[LeaderboardEntry], kind: LeaderboardKind, limit: usize) -> Vec<Standing> {
    let mut scored: Vec<(u64, &LeaderboardEntry)> = entries.iter().map(|e| (kind.value(e), e)).collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.user_id.cmp(&b.1.user_id)));

    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (value, entry))| Standing {
            position: i + 1,
            user_id: entry.user_id.clone(),
            username: entry.username.clone(),
            title: entry.stats.rank,
            level: entry.stats.level,
            win_streak: entry.stats.win_streak,
            value,
        })
        .collect()
}

/// The user's row with one neighbour on each side, widened to three rows
/// at either end of the board. Empty if the user is not on it.
pub fn neighbors<'a>(standings: &'a [Standing], user_id: &str) -> &'a [Standing] {
    let Some(index) = standings.iter().position(|s| s.user_id == user_id) else {
        return &[];
    };

    let start = index.saturating_sub(1);
    let end = (index + 2).min(standings.len());
    if end - start >= 3 || standings.len() < 3 {
        return &standings[start..end];
    }

    if start == 0 {
        &standings[..3]
    } else {
        &standings[standings.len() - 3..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, points: u32, words: u32, level: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: id.to_string(),
            username: id.to_uppercase(),
            stats: PlayerStats {
                rank_points: points,
                mastered_words_count: words,
                level,
                ..PlayerStats::default()
            },
            gear: StatBonus::default(),
        }
    }

    fn sample() -> Vec<LeaderboardEntry> {
        vec![
            entry("a", 5, 300, 1),
            entry("b", 20, 10, 2),
            entry("c", 12, 50, 9),
            entry("d", 12, 0, 1),
            entry("e", 1, 1, 1),
        ]
    }

    #[test]
    fn test_rank_points_board() {
        let board = build(&sample(), LeaderboardKind::RankPoints, 10);
        let ids: Vec<_> = board.iter().map(|s| s.user_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d", "a", "e"]);
        assert_eq!(board[0].position, 1);
        assert_eq!(board[1].value, 12);
    }

    #[test]
    fn test_other_boards() {
        let words = build(&sample(), LeaderboardKind::Words, 2);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].user_id, "a");

        let power = build(&sample(), LeaderboardKind::Power, 1);
        assert_eq!(power[0].user_id, "c");
    }

    #[test]
    fn test_neighbors() {
        let board = build(&sample(), LeaderboardKind::RankPoints, 10);
        let ids = |rows: &[Standing]| rows.iter().map(|s| s.user_id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(neighbors(&board, "d")), vec!["c", "d", "a"]);
        assert_eq!(ids(neighbors(&board, "b")), vec!["b", "c", "d"]);
        assert_eq!(ids(neighbors(&board, "e")), vec!["d", "a", "e"]);
        assert!(neighbors(&board, "zzz").is_empty());
        assert_eq!(neighbors(&board[..1], "b").len(), 1);
    }
}
