//! Event types for different topics.

use game_core::{
    Action, ActionResult, BattleResult, BattleState, ErrorKind, PerTeam, ScheduledFlip, TeamId,
    TransitionPhase, TurnChange,
};
use serde::{Deserialize, Serialize};

/// Events related to action execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BattleEvent {
    /// An action was applied.
    ActionExecuted {
        action: Action,
        nonce: u64,
        result: ActionResult,
        /// Read model after the action.
        state: Box<BattleState>,
    },

    /// An action was rejected; the state did not change.
    ActionRejected {
        action: Action,
        /// `None` when turn ownership or battle status rejected it.
        phase: Option<TransitionPhase>,
        kind: ErrorKind,
        code: String,
        error: String,
    },
}

/// Events related to turn management (lightweight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The countdown moved.
    Countdown { team: TeamId, time_left: u32 },

    /// A hit resolved and the turn will flip after the delay.
    FlipScheduled(ScheduledFlip),

    /// A new turn started.
    Changed(TurnChange),
}

/// Events related to the match outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEvent {
    Finished {
        result: BattleResult,
        scores: PerTeam<u32>,
    },
}
