//! Action transition dispatch and execution logic.

use crate::action::{
    Action, ActionResult, ActionTransition, PlayerActionKind, SystemActionKind,
};
use crate::config::BattleConfig;
use crate::state::BattleState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the battle state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    config: &BattleConfig,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action type to its transition and wraps the result in
/// [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut BattleState,
    config: &BattleConfig,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Player(player) => match &player.kind {
            PlayerActionKind::SelectAttacker(transition) => {
                drive_transition(transition, state, config).map_err(ExecuteError::SelectAttacker)
            }
            PlayerActionKind::SelectAttack(transition) => {
                drive_transition(transition, state, config).map_err(ExecuteError::SelectAttack)
            }
            PlayerActionKind::CancelAttack(transition) => {
                drive_transition(transition, state, config).map_err(ExecuteError::CancelAttack)
            }
            PlayerActionKind::SelectTarget(transition) => {
                drive_transition(transition, state, config).map_err(ExecuteError::SelectTarget)
            }
        },
        Action::System { kind } => match kind {
            SystemActionKind::Tick(transition) => {
                drive_transition(transition, state, config).map_err(ExecuteError::Tick)
            }
            SystemActionKind::CompleteTurn(transition) => {
                drive_transition(transition, state, config).map_err(ExecuteError::CompleteTurn)
            }
        },
    }
}
