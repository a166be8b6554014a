//! Ranking: ladder points, tiers, power score and leaderboards

pub mod ladder;
pub mod power;
pub mod leaderboard;

pub use ladder::{apply_match_result, tier_for_points, tier_floor, points_to_next_tier, RankChange};
pub use power::power_score;
pub use leaderboard::{build as build_leaderboard, neighbors, LeaderboardEntry, LeaderboardKind, Standing};
