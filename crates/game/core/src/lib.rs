//! Deterministic battle logic and data types shared across clients.
//!
//! `game-core` defines the canonical rules of a two-team card battle (actions,
//! engine, battle state) and exposes pure APIs that can be reused by both the
//! runtime and offline tools. All state mutation flows through
//! [`engine::BattleEngine`]; there is no clock or I/O in this crate. Time is
//! advanced by feeding [`Action::tick`] from outside.
pub mod action;
pub mod attack;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use action::{
    Action, ActionError, ActionResult, ActionTransition, CancelAttackAction, CompleteTurnAction,
    FlipReason, PlayerAction, PlayerActionKind, ScheduledFlip, SelectAttackAction,
    SelectAttackerAction, SelectTargetAction, SystemActionKind, TargetResolution, TickAction,
    TickResult, TurnChange,
};
pub use attack::{Attack, AttackCatalog, AttackKind, AttackSource, AttackSpec, AttackStats};
pub use combat::{HitOutcome, apply_damage};
pub use config::BattleConfig;
pub use engine::{
    BattleEngine, ExecuteError, ExecutionOutcome, StateReducer, TransitionPhase,
    TransitionPhaseError,
};
pub use error::{ErrorKind, ErrorSeverity, GameError};
pub use state::{
    BattleResult, BattleState, Character, FlipToken, PerTeam, Phase, SlotIndex, Team, TeamId,
    TurnState,
};
