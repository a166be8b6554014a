//! Damage calculation
//!
//! The two damage models: skill-scored attacks driven by an external
//! performance score, and rolled enemy strikes mitigated by defense.

use rand::Rng;

/// Scores strictly above this double the damage
pub const CRIT_SCORE_THRESHOLD: f64 = 85.0;
pub const CRIT_MULTIPLIER: u32 = 2;
/// Enemy strike roll, half-open range
pub const ENEMY_ROLL_MIN: u32 = 5;
pub const ENEMY_ROLL_MAX: u32 = 15;
/// Every full `DEF_PER_POINT` defense blocks one damage
pub const DEF_PER_POINT: u32 = 5;

/// Result of a single attack
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResult {
    /// Damage before mitigation
    pub base_damage: u32,
    /// Damage actually dealt
    pub final_damage: u32,
    /// Whether the score crossed the bonus threshold
    pub is_crit: bool,
    /// Descriptive message
    pub message: String,
}

/// Clamp a performance score into [0, 100]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Skill-scored damage: `floor(atk * score/100 * m)`, `m = 2` above 85
pub fn skill_damage(atk: u32, score: f64) -> AttackResult {
    let score = clamp_score(score);
    let is_crit = score > CRIT_SCORE_THRESHOLD;
    let multiplier = if is_crit { CRIT_MULTIPLIER } else { 1 };

    // Multiply before dividing so whole-number scores stay exact
    let damage = (atk as f64 * score * multiplier as f64 / 100.0).floor() as u32;

    let message = if is_crit {
        format!("Score {}! CRIT {} damage", score, damage)
    } else {
        format!("Score {}, {} damage", score, damage)
    };

    AttackResult {
        base_damage: damage,
        final_damage: damage,
        is_crit,
        message,
    }
}

/// Raw enemy strike in [5, 15)
pub fn roll_enemy_attack(rng: &mut impl Rng) -> u32 {
    rng.gen_range(ENEMY_ROLL_MIN..ENEMY_ROLL_MAX)
}

/// Defense reduces a raw strike by `floor(def / 5)`, never below zero
pub fn mitigate(raw: u32, def: u32) -> u32 {
    raw.saturating_sub(def / DEF_PER_POINT)
}

/// Defensive-mode damage for an already rolled strike
pub fn defensive_damage(raw: u32, def: u32) -> AttackResult {
    let damage = mitigate(raw, def);
    let message = if damage == 0 {
        "blocked".to_string()
    } else {
        format!("{} damage", damage)
    };

    AttackResult {
        base_damage: raw,
        final_damage: damage,
        is_crit: false,
        message,
    }
}

/// HP left after taking damage, kept inside [0, max_hp]
pub fn apply_damage(hp: u32, max_hp: u32, damage: u32) -> u32 {
    hp.min(max_hp).saturating_sub(damage)
}
