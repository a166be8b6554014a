//! Achievements
//!
//! Achievements are a fixed table of pure predicates over [`PlayerStats`].
//! Unlock status is evaluated on demand and never stored, so it always
//! agrees with the stats it was computed from.

use std::collections::BTreeSet;
use std::fmt;

use crate::player::{PlayerStats, Rank};

/// Achievement definition
#[derive(Clone, Copy)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub condition: fn(&PlayerStats) -> bool,
}

impl fmt::Debug for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Achievement")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl Achievement {
    pub fn is_unlocked(&self, stats: &PlayerStats) -> bool {
        (self.condition)(stats)
    }
}

/// An achievement paired with its status for a given set of stats
#[derive(Debug, Clone, Copy)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub unlocked: bool,
}

/// Which achievements a list view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AchievementFilter {
    #[default]
    All,
    Unlocked,
    Locked,
}

impl AchievementFilter {
    fn admits(&self, unlocked: bool) -> bool {
        match self {
            AchievementFilter::All => true,
            AchievementFilter::Unlocked => unlocked,
            AchievementFilter::Locked => !unlocked,
        }
    }
}

static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "word_1",
        title: "First Word",
        description: "Master your first word",
        condition: |s| s.mastered_words_count >= 1,
    },
    Achievement {
        id: "word_10",
        title: "Word Collector",
        description: "Master 10 words",
        condition: |s| s.mastered_words_count >= 10,
    },
    Achievement {
        id: "word_100",
        title: "Lexicon",
        description: "Master 100 words",
        condition: |s| s.mastered_words_count >= 100,
    },
    Achievement {
        id: "word_500",
        title: "Walking Dictionary",
        description: "Master 500 words",
        condition: |s| s.mastered_words_count >= 500,
    },
    Achievement {
        id: "level_5",
        title: "Seasoned",
        description: "Reach level 5",
        condition: |s| s.level >= 5,
    },
    Achievement {
        id: "level_10",
        title: "Veteran",
        description: "Reach level 10",
        condition: |s| s.level >= 10,
    },
    Achievement {
        id: "streak_3",
        title: "Hat Trick",
        description: "Win 3 duels in a row",
        condition: |s| s.win_streak >= 3,
    },
    Achievement {
        id: "streak_10",
        title: "Unstoppable",
        description: "Win 10 duels in a row",
        condition: |s| s.win_streak >= 10,
    },
    Achievement {
        id: "login_7",
        title: "Dedicated",
        description: "Log in on 7 days",
        condition: |s| s.login_days >= 7,
    },
    Achievement {
        id: "rank_silver",
        title: "Silver Tongue",
        description: "Climb to Silver rank",
        condition: |s| s.rank >= Rank::Silver,
    },
    Achievement {
        id: "rank_gold",
        title: "Golden Voice",
        description: "Climb to Gold rank",
        condition: |s| s.rank >= Rank::Gold,
    },
    Achievement {
        id: "gold_1000",
        title: "Treasurer",
        description: "Hold 1,000 gold",
        condition: |s| s.gold >= 1000,
    },
];

/// The built-in achievement table
pub fn all_achievements() -> &'static [Achievement] {
    ACHIEVEMENTS
}

/// Ids of every achievement whose predicate holds for `stats`
pub fn unlocked_set(stats: &PlayerStats, defs: &[Achievement]) -> BTreeSet<&'static str> {
    defs.iter()
        .filter(|a| a.is_unlocked(stats))
        .map(|a| a.id)
        .collect()
}

/// Evaluate the built-in table for a list view
pub fn evaluate(stats: &PlayerStats, filter: AchievementFilter) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| AchievementStatus {
            achievement,
            unlocked: achievement.is_unlocked(stats),
        })
        .filter(|status| filter.admits(status.unlocked))
        .collect()
}
