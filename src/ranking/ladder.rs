//! Rank ladder
//!
//! Match outcomes move rank points; the tier is a pure lookup from points.

use crate::combat::MatchOutcome;
use crate::player::{PlayerStats, Rank};

/// Ascending tier table: (min points, max points inclusive, tier)
const TIERS: &[(u32, u32, Rank)] = &[
    (0, 9, Rank::Bronze),
    (10, 24, Rank::Silver),
    (25, 49, Rank::Gold),
    (50, 99, Rank::Platinum),
    (100, 199, Rank::Diamond),
    (200, 399, Rank::Master),
    (400, u32::MAX, Rank::Legend),
];

/// Tier for a point total
pub fn tier_for_points(points: u32) -> Rank {
    TIERS
        .iter()
        .find(|(min, max, _)| (*min..=*max).contains(&points))
        .map(|(_, _, rank)| *rank)
        .unwrap_or(Rank::Legend)
}

/// Points needed to enter a tier
pub fn tier_floor(rank: Rank) -> u32 {
    TIERS
        .iter()
        .find(|(_, _, r)| *r == rank)
        .map(|(min, _, _)| *min)
        .unwrap_or(0)
}

/// Points still missing for the next tier, `None` at the top
pub fn points_to_next_tier(points: u32) -> Option<u32> {
    let current = tier_for_points(points);
    TIERS
        .iter()
        .find(|(_, _, r)| *r > current)
        .map(|(min, _, _)| min - points)
}

/// What a match did to the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankChange {
    pub points_delta: i32,
    pub old_rank: Rank,
    pub new_rank: Rank,
}

impl RankChange {
    pub fn promoted(&self) -> bool {
        self.new_rank > self.old_rank
    }

    pub fn demoted(&self) -> bool {
        self.new_rank < self.old_rank
    }
}

/// Apply a match outcome to rank points and streak.
///
/// A win is always +1. A loss resets the streak and costs one point,
/// except at Bronze, and never goes below zero. Draws change nothing.
pub fn apply_match_result(stats: &PlayerStats, outcome: MatchOutcome) -> (PlayerStats, RankChange) {
    let mut next = stats.clone();

    match outcome {
        MatchOutcome::Win => {
            next.rank_points = next.rank_points.saturating_add(1);
            next.win_streak = next.win_streak.saturating_add(1);
        }
        MatchOutcome::Loss => {
            next.win_streak = 0;
            if stats.rank != Rank::Bronze {
                next.rank_points = next.rank_points.saturating_sub(1);
            }
        }
        MatchOutcome::Draw => {}
    }
    next.rank = tier_for_points(next.rank_points);

    let change = RankChange {
        points_delta: next.rank_points as i32 - stats.rank_points as i32,
        old_rank: stats.rank,
        new_rank: next.rank,
    };
    if change.promoted() {
        log::info!("Promoted to {} ({} points)", next.rank, next.rank_points);
    } else if change.demoted() {
        log::info!("Demoted to {} ({} points)", next.rank, next.rank_points);
    }

    (next, change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(points: u32) -> PlayerStats {
        PlayerStats {
            rank_points: points,
            rank: tier_for_points(points),
            ..PlayerStats::default()
        }
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(tier_for_points(0), Rank::Bronze);
        assert_eq!(tier_for_points(9), Rank::Bronze);
        assert_eq!(tier_for_points(10), Rank::Silver);
        assert_eq!(tier_for_points(49), Rank::Gold);
        assert_eq!(tier_for_points(400), Rank::Legend);
        assert_eq!(tier_for_points(u32::MAX), Rank::Legend);
        assert_eq!(tier_floor(Rank::Diamond), 100);
        assert_eq!(points_to_next_tier(7), Some(3));
        assert_eq!(points_to_next_tier(500), None);
    }

    #[test]
    fn test_win() {
        let (next, change) = apply_match_result(&at(9), MatchOutcome::Win);
        assert_eq!(next.rank_points, 10);
        assert_eq!(next.win_streak, 1);
        assert_eq!(next.rank, Rank::Silver);
        assert!(change.promoted());
        assert_eq!(change.points_delta, 1);
    }

    #[test]
    fn test_bronze_loss_protected() {
        let stats = PlayerStats { win_streak: 4, ..at(5) };
        let (next, change) = apply_match_result(&stats, MatchOutcome::Loss);
        assert_eq!(next.rank_points, 5);
        assert_eq!(next.win_streak, 0);
        assert_eq!(change.points_delta, 0);
    }

    #[test]
    fn test_loss_above_bronze() {
        let (next, change) = apply_match_result(&at(10), MatchOutcome::Loss);
        assert_eq!(next.rank_points, 9);
        assert_eq!(next.rank, Rank::Bronze);
        assert!(change.demoted());
        assert_eq!(change.points_delta, -1);
    }

    #[test]
    fn test_loss_floored_at_zero() {
        // Stored rank can disagree with points after a manual edit
        let stats = PlayerStats { rank: Rank::Gold, rank_points: 0, ..PlayerStats::default() };
        let (next, _) = apply_match_result(&stats, MatchOutcome::Loss);
        assert_eq!(next.rank_points, 0);
    }

    #[test]
    fn test_draw_changes_nothing() {
        let stats = PlayerStats { win_streak: 2, ..at(30) };
        let (next, change) = apply_match_result(&stats, MatchOutcome::Draw);
        assert_eq!(next, stats);
        assert_eq!(change.points_delta, 0);
    }

    proptest! {
        #[test]
        fn prop_loss_rules(points in 0u32..1_000) {
            let stats = at(points);
            let (next, _) = apply_match_result(&stats, MatchOutcome::Loss);
            if stats.rank == Rank::Bronze {
                prop_assert_eq!(next.rank_points, points);
            } else {
                prop_assert_eq!(next.rank_points, points.saturating_sub(1));
            }
            prop_assert_eq!(next.win_streak, 0);
            prop_assert_eq!(next.rank, tier_for_points(next.rank_points));
        }
    }
}
