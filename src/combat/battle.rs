//! Battle state machine
//!
//! A single battle between the player and one opponent. Turns alternate
//! strictly: the player acts, then the enemy, until one side reaches 0 HP.
//!
//! ```text
//! AwaitingPlayerAction -> ResolvingPlayerTurn -> AwaitingEnemyAction
//!         ^                                            |
//!         +---------------- ResolvingEnemyTurn <-------+
//!                                  |
//!                         Victory / Defeat (terminal)
//! ```
//!
//! The player's damage depends on an external score (quiz or speech judge)
//! that arrives asynchronously. [`Battle::begin_player_turn`] hands out a
//! [`TurnTicket`] for that pending request; only the matching ticket can
//! resolve or abandon it. Rendering is decoupled: every transition and hit
//! is queued as a [`BattleSignal`] for the renderer to drain.

use std::collections::VecDeque;

use rand::Rng;
use thiserror::Error;

use super::damage::{apply_damage, clamp_score, defensive_damage, roll_enemy_attack, skill_damage, AttackResult};
use super::outcome::{BattleMode, MatchOutcome, MatchResult};
use crate::player::CombatStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    AwaitingPlayerAction,
    /// A skill score has been requested and not yet delivered
    ResolvingPlayerTurn,
    AwaitingEnemyAction,
    ResolvingEnemyTurn,
    Victory,
    Defeat,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattlePhase::Victory | BattlePhase::Defeat)
    }
}

/// What the renderer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEventKind {
    Attack,
    Hit,
    Block,
}

/// One renderer cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatEvent {
    pub kind: CombatEventKind,
    pub target: Side,
    pub damage: Option<u32>,
}

/// Fire-and-forget notification for observers
#[derive(Debug, Clone, PartialEq)]
pub enum BattleSignal {
    Phase(BattlePhase),
    Combat(CombatEvent),
    /// Emitted exactly once, on the terminal transition
    Finished(MatchOutcome),
}

/// Handle for the single pending player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnTicket(u64);

/// How the enemy attacks this turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyMove {
    /// Opponent's own skill score (blitz)
    Scored(f64),
    /// A raw strike to be mitigated by the player's defense
    Strike(u32),
}

impl EnemyMove {
    /// Roll a fresh strike
    pub fn roll(rng: &mut impl Rng) -> Self {
        EnemyMove::Strike(roll_enemy_attack(rng))
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BattleError {
    #[error("cannot do that while {actual:?} (expected {expected:?})")]
    WrongPhase { expected: BattlePhase, actual: BattlePhase },
    #[error("turn ticket is stale or belongs to another request")]
    StaleTicket,
    #[error("battle is already over")]
    Finished,
    #[error("{mode:?} battles do not accept {action:?}")]
    WrongMove { mode: BattleMode, action: EnemyMove },
}

/// One side of a battle
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
}

impl Combatant {
    pub fn new(name: &str, hp: u32, atk: u32, def: u32) -> Self {
        Self {
            name: name.to_string(),
            hp,
            max_hp: hp,
            atk,
            def,
        }
    }

    /// Build from gear-inclusive stats
    pub fn from_stats(name: &str, stats: &CombatStats) -> Self {
        Self {
            name: name.to_string(),
            hp: stats.hp.min(stats.max_hp),
            max_hp: stats.max_hp,
            atk: stats.atk,
            def: stats.def,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    fn take(&mut self, damage: u32) {
        self.hp = apply_damage(self.hp, self.max_hp, damage);
    }
}

/// A running battle
#[derive(Debug, Clone)]
pub struct Battle {
    mode: BattleMode,
    player: Combatant,
    enemy: Combatant,
    phase: BattlePhase,
    pending: Option<TurnTicket>,
    next_ticket: u64,
    round: u32,
    damage_dealt: u32,
    damage_taken: u32,
    /// Sum of clamped scores over resolved player turns
    score_total: f64,
    scored_turns: u32,
    signals: VecDeque<BattleSignal>,
}

impl Battle {
    pub fn new(mode: BattleMode, player: Combatant, enemy: Combatant) -> Self {
        log::info!(
            "{} battle: {} ({} HP) vs {} ({} HP)",
            mode.name(),
            player.name,
            player.hp,
            enemy.name,
            enemy.hp
        );
        let mut battle = Self {
            mode,
            player,
            enemy,
            phase: BattlePhase::AwaitingPlayerAction,
            pending: None,
            next_ticket: 1,
            round: 1,
            damage_dealt: 0,
            damage_taken: 0,
            score_total: 0.0,
            scored_turns: 0,
            signals: VecDeque::new(),
        };
        // A side that starts at 0 HP has already lost
        if battle.player.is_defeated() {
            battle.transition(BattlePhase::Defeat);
        } else if battle.enemy.is_defeated() {
            battle.transition(BattlePhase::Victory);
        } else {
            battle.signals.push_back(BattleSignal::Phase(battle.phase));
        }
        battle
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Terminal outcome, if reached
    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.phase {
            BattlePhase::Victory => Some(MatchOutcome::Win),
            BattlePhase::Defeat => Some(MatchOutcome::Loss),
            _ => None,
        }
    }

    /// Result for ranking and history once the battle has ended
    pub fn match_result(&self) -> Option<MatchResult> {
        self.outcome().map(|outcome| MatchResult {
            mode: self.mode,
            outcome,
            damage_dealt: self.damage_dealt,
            damage_taken: self.damage_taken,
            score: self.average_score(),
            score_change: None,
        })
    }

    /// Mean of the scores delivered so far, rounded; `None` before any
    pub fn average_score(&self) -> Option<u32> {
        if self.scored_turns == 0 {
            return None;
        }
        Some((self.score_total / f64::from(self.scored_turns)).round() as u32)
    }

    /// Take all queued signals
    pub fn drain_signals(&mut self) -> Vec<BattleSignal> {
        self.signals.drain(..).collect()
    }

    /// Start the player's action (e.g. open the microphone).
    ///
    /// Only one request may be pending at a time.
    pub fn begin_player_turn(&mut self) -> Result<TurnTicket, BattleError> {
        self.expect_phase(BattlePhase::AwaitingPlayerAction)?;

        let ticket = TurnTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        self.transition(BattlePhase::ResolvingPlayerTurn);
        Ok(ticket)
    }

    /// Deliver the score for a pending player action and deal the damage
    pub fn resolve_player_turn(&mut self, ticket: TurnTicket, score: f64) -> Result<AttackResult, BattleError> {
        self.expect_phase(BattlePhase::ResolvingPlayerTurn)?;
        self.check_ticket(ticket)?;
        self.pending = None;

        let attack = skill_damage(self.player.atk, score);
        self.score_total += clamp_score(score);
        self.scored_turns += 1;
        log::debug!("Round {}: {} -> {} ({})", self.round, self.player.name, self.enemy.name, attack.message);

        self.enemy.take(attack.final_damage);
        self.damage_dealt = self.damage_dealt.saturating_add(attack.final_damage);
        self.push_exchange(Side::Player, Side::Enemy, attack.final_damage);

        if self.enemy.is_defeated() {
            self.transition(BattlePhase::Victory);
        } else {
            self.transition(BattlePhase::AwaitingEnemyAction);
        }
        Ok(attack)
    }

    /// Drop a pending player action without applying any damage
    pub fn abandon_player_turn(&mut self, ticket: TurnTicket) -> Result<(), BattleError> {
        self.expect_phase(BattlePhase::ResolvingPlayerTurn)?;
        self.check_ticket(ticket)?;
        self.pending = None;
        log::debug!("Round {}: player action abandoned", self.round);
        self.transition(BattlePhase::AwaitingPlayerAction);
        Ok(())
    }

    /// Resolve the enemy's turn
    pub fn resolve_enemy_turn(&mut self, action: EnemyMove) -> Result<AttackResult, BattleError> {
        self.expect_phase(BattlePhase::AwaitingEnemyAction)?;

        let attack = match (self.mode, action) {
            (BattleMode::Blitz, EnemyMove::Scored(score)) => skill_damage(self.enemy.atk, score),
            (BattleMode::Boss | BattleMode::Tactics, EnemyMove::Strike(raw)) => defensive_damage(raw, self.player.def),
            (mode, action) => return Err(BattleError::WrongMove { mode, action }),
        };

        self.transition(BattlePhase::ResolvingEnemyTurn);
        log::debug!("Round {}: {} -> {} ({})", self.round, self.enemy.name, self.player.name, attack.message);

        self.player.take(attack.final_damage);
        self.damage_taken = self.damage_taken.saturating_add(attack.final_damage);
        self.push_exchange(Side::Enemy, Side::Player, attack.final_damage);

        if self.player.is_defeated() {
            self.transition(BattlePhase::Defeat);
        } else {
            self.round += 1;
            self.transition(BattlePhase::AwaitingPlayerAction);
        }
        Ok(attack)
    }

    /// Give up; any pending request is dropped
    pub fn surrender(&mut self) -> Result<(), BattleError> {
        if self.is_over() {
            return Err(BattleError::Finished);
        }
        self.pending = None;
        log::info!("{} surrendered in round {}", self.player.name, self.round);
        self.transition(BattlePhase::Defeat);
        Ok(())
    }

    fn expect_phase(&self, expected: BattlePhase) -> Result<(), BattleError> {
        if self.is_over() {
            Err(BattleError::Finished)
        } else if self.phase != expected {
            Err(BattleError::WrongPhase { expected, actual: self.phase })
        } else {
            Ok(())
        }
    }

    fn check_ticket(&self, ticket: TurnTicket) -> Result<(), BattleError> {
        if self.pending == Some(ticket) {
            Ok(())
        } else {
            Err(BattleError::StaleTicket)
        }
    }

    fn push_exchange(&mut self, attacker: Side, target: Side, damage: u32) {
        self.signals.push_back(BattleSignal::Combat(CombatEvent {
            kind: CombatEventKind::Attack,
            target: attacker,
            damage: None,
        }));
        let kind = if damage == 0 { CombatEventKind::Block } else { CombatEventKind::Hit };
        self.signals.push_back(BattleSignal::Combat(CombatEvent {
            kind,
            target,
            damage: Some(damage),
        }));
    }

    fn transition(&mut self, next: BattlePhase) {
        self.phase = next;
        self.signals.push_back(BattleSignal::Phase(next));
        if let Some(outcome) = self.outcome() {
            log::info!("Battle over after {} rounds: {:?}", self.round, outcome);
            self.signals.push_back(BattleSignal::Finished(outcome));
        }
    }
}

/// Convenience for callers that roll enemy strikes locally
pub fn enemy_move_for(mode: BattleMode, opponent_score: Option<f64>, rng: &mut impl Rng) -> EnemyMove {
    match (mode, opponent_score) {
        (BattleMode::Blitz, Some(score)) => EnemyMove::Scored(score),
        (BattleMode::Blitz, None) => EnemyMove::Scored(0.0),
        _ => EnemyMove::roll(rng),
    }
}
