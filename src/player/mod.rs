//! Player progression state

pub mod stats;
pub mod profile;

pub use stats::{PlayerStats, Rank, StatKind, CombatStats};
pub use profile::Profile;
