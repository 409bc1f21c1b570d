//! Error types for action execution pipeline.

use crate::action::{
    ActionError, ActionTransition, CancelAttackAction, CompleteTurnAction, SelectAttackAction,
    SelectAttackerAction, SelectTargetAction, TickAction,
};
use crate::error::{ErrorKind, ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the battle engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("select attacker failed: {0}")]
    SelectAttacker(TransitionPhaseError<<SelectAttackerAction as ActionTransition>::Error>),

    #[error("select attack failed: {0}")]
    SelectAttack(TransitionPhaseError<<SelectAttackAction as ActionTransition>::Error>),

    #[error("cancel attack failed: {0}")]
    CancelAttack(TransitionPhaseError<<CancelAttackAction as ActionTransition>::Error>),

    #[error("select target failed: {0}")]
    SelectTarget(TransitionPhaseError<<SelectTargetAction as ActionTransition>::Error>),

    #[error("tick failed: {0}")]
    Tick(TransitionPhaseError<<TickAction as ActionTransition>::Error>),

    #[error("complete turn failed: {0}")]
    CompleteTurn(TransitionPhaseError<<CompleteTurnAction as ActionTransition>::Error>),

    /// Rejected before any transition ran (turn ownership, battle over,
    /// resolving).
    #[error("action rejected: {0}")]
    Actor(ActionError),
}

impl ExecuteError {
    /// The underlying rejection reason.
    pub fn error(&self) -> &ActionError {
        match self {
            ExecuteError::SelectAttacker(inner)
            | ExecuteError::SelectAttack(inner)
            | ExecuteError::CancelAttack(inner)
            | ExecuteError::SelectTarget(inner)
            | ExecuteError::Tick(inner)
            | ExecuteError::CompleteTurn(inner) => &inner.error,
            ExecuteError::Actor(error) => error,
        }
    }

    /// Pipeline phase that rejected the action, `None` for actor checks.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            ExecuteError::SelectAttacker(inner)
            | ExecuteError::SelectAttack(inner)
            | ExecuteError::CancelAttack(inner)
            | ExecuteError::SelectTarget(inner)
            | ExecuteError::Tick(inner)
            | ExecuteError::CompleteTurn(inner) => Some(inner.phase),
            ExecuteError::Actor(_) => None,
        }
    }
}

impl GameError for ExecuteError {
    fn kind(&self) -> ErrorKind {
        self.error().kind()
    }

    fn severity(&self) -> ErrorSeverity {
        self.error().severity()
    }

    fn error_code(&self) -> &'static str {
        self.error().error_code()
    }
}
