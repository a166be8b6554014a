//! Combat system

pub mod damage;
pub mod outcome;
pub mod battle;

pub use damage::{skill_damage, defensive_damage, mitigate, roll_enemy_attack, apply_damage, AttackResult};
pub use outcome::{BattleMode, MatchOutcome, MatchResult};
pub use battle::{Battle, BattleError, BattlePhase, BattleSignal, Combatant, CombatEvent, CombatEventKind, EnemyMove, Side, TurnTicket, enemy_move_for};
