//! Turn state machine and action execution pipeline.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`]. It
//! orchestrates the transition phases and surfaces rich error information for
//! the runtime. Player intents, clock ticks and deferred flips all flow
//! through the same `execute()` pipeline.

mod errors;
mod reducer;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use reducer::{StateReducer, TeamReducer, TurnReducer};

use crate::action::{Action, ActionError, ActionResult};
use crate::config::BattleConfig;
use crate::state::BattleState;

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Nonce of the transition that produced this outcome.
    pub nonce: u64,

    /// Action-specific execution result.
    pub result: ActionResult,
}

/// Battle engine that validates and applies actions.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// A rejected action leaves the state exactly as it was.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Executes an action by routing it through the appropriate transition
    /// pipeline.
    ///
    /// Enforces actor validation before execution:
    /// - Nothing is accepted once the battle is over
    /// - Player actions must come from `state.turn.current`
    /// - Player actions are refused while a hit is resolving
    pub fn execute(
        &mut self,
        config: &BattleConfig,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_actor(action).map_err(ExecuteError::Actor)?;

        let before = self.state.clone();

        let result = match transition::execute_transition(action, self.state, config) {
            Ok(result) => result,
            Err(error) => {
                *self.state = before;
                return Err(error);
            }
        };

        let nonce = self.state.turn.nonce;
        self.state.turn.nonce += 1;

        Ok(ExecutionOutcome { nonce, result })
    }

    fn validate_actor(&self, action: &Action) -> Result<(), ActionError> {
        if self.state.is_over() {
            return Err(ActionError::BattleOver);
        }

        match action {
            Action::System { .. } => Ok(()),
            Action::Player(player) => {
                let current = self.state.turn.current;
                if player.team != current {
                    return Err(ActionError::NotYourTurn {
                        team: player.team,
                        current,
                    });
                }
                if self.state.turn.pending_flip.is_some() {
                    return Err(ActionError::TurnResolving);
                }
                Ok(())
            }
        }
    }
}
