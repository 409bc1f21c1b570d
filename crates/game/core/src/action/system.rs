//! System actions issued by whoever owns the clock.

use crate::action::{ActionError, ActionResult, ActionTransition, FlipReason, TickResult};
use crate::config::BattleConfig;
use crate::engine::StateReducer;
use crate::state::{BattleState, FlipToken};

/// One clock tick.
///
/// The countdown is paused while a hit resolves. When it reaches zero the
/// acting team forfeits the turn: selections are cleared and the other team
/// starts with a full countdown. Health and scores are untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickAction;

impl ActionTransition for TickAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn apply(
        &self,
        state: &mut BattleState,
        config: &BattleConfig,
    ) -> Result<Self::Result, Self::Error> {
        if state.turn.pending_flip.is_some() {
            return Ok(ActionResult::Tick(TickResult::Paused));
        }

        let mut reducer = StateReducer::new(state);
        let mut turn = reducer.turn();
        let time_left = turn.count_down();
        if time_left > 0 {
            return Ok(ActionResult::Tick(TickResult::Counting { time_left }));
        }

        let change = turn.flip(FlipReason::TimedOut, config.effective_turn_duration());
        Ok(ActionResult::Tick(TickResult::Expired(change)))
    }
}

/// Performs the deferred flip scheduled by a resolved hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteTurnAction {
    pub token: FlipToken,
}

impl CompleteTurnAction {
    pub fn new(token: FlipToken) -> Self {
        Self { token }
    }
}

impl ActionTransition for CompleteTurnAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        match state.turn.pending_flip {
            None => Err(ActionError::NoPendingFlip),
            Some(pending) if pending != self.token => Err(ActionError::StaleFlip {
                token: self.token,
                pending: Some(pending),
            }),
            Some(_) => Ok(()),
        }
    }

    fn apply(
        &self,
        state: &mut BattleState,
        config: &BattleConfig,
    ) -> Result<Self::Result, Self::Error> {
        let change = StateReducer::new(state)
            .turn()
            .flip(FlipReason::Resolved, config.effective_turn_duration());
        Ok(ActionResult::TurnCompleted(change))
    }

    fn post_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        debug_assert!(state.turn.pending_flip.is_none());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, ActionError, ActionResult, FlipReason, TickResult};
    use crate::attack::AttackKind;
    use crate::config::BattleConfig;
    use crate::state::{FlipToken, Phase, TeamId};
    use crate::test_utils::{battle, run};

    #[test]
    fn tick_counts_down() {
        let config = BattleConfig::default();
        let mut state = battle(&config);

        let outcome = run(&mut state, &config, Action::tick()).unwrap();

        assert_eq!(
            outcome.result,
            ActionResult::Tick(TickResult::Counting { time_left: 119 })
        );
        assert_eq!(state.turn.time_left, 119);
    }

    #[test]
    fn expiry_forfeits_turn_once() {
        let config = BattleConfig::default().with_turn_duration(3);
        let mut state = battle(&config);
        run(&mut state, &config, Action::select_attacker(TeamId::One, 0)).unwrap();
        run(&mut state, &config, Action::select_attack(TeamId::One, AttackKind::Power)).unwrap();
        let teams_before = state.teams.clone();

        run(&mut state, &config, Action::tick()).unwrap();
        run(&mut state, &config, Action::tick()).unwrap();
        let outcome = run(&mut state, &config, Action::tick()).unwrap();

        let ActionResult::Tick(TickResult::Expired(change)) = outcome.result else {
            panic!("expected expiry");
        };
        assert_eq!(change.previous, TeamId::One);
        assert_eq!(change.current, TeamId::Two);
        assert_eq!(change.number, 2);
        assert_eq!(change.reason, FlipReason::TimedOut);
        assert_eq!(state.turn.time_left, 3);
        assert_eq!(state.phase(), Phase::AwaitingAttacker);
        assert_eq!(state.teams, teams_before);
        assert_eq!(state.scores[TeamId::One], 0);

        let outcome = run(&mut state, &config, Action::tick()).unwrap();
        assert_eq!(
            outcome.result,
            ActionResult::Tick(TickResult::Counting { time_left: 2 })
        );
    }

    #[test]
    fn ticks_pause_while_resolving() {
        let config = BattleConfig::default().with_turn_duration(1);
        let mut state = battle(&config);
        run(&mut state, &config, Action::select_attacker(TeamId::One, 0)).unwrap();
        run(&mut state, &config, Action::select_attack(TeamId::One, AttackKind::Normal)).unwrap();
        run(&mut state, &config, Action::select_target(TeamId::One, 0)).unwrap();

        let outcome = run(&mut state, &config, Action::tick()).unwrap();

        assert_eq!(outcome.result, ActionResult::Tick(TickResult::Paused));
        assert_eq!(state.turn.current, TeamId::One);
        assert_eq!(state.phase(), Phase::Resolving);
    }

    #[test]
    fn complete_turn_flips_and_resets() {
        let config = BattleConfig::default();
        let mut state = battle(&config);
        run(&mut state, &config, Action::tick()).unwrap();
        run(&mut state, &config, Action::select_attacker(TeamId::One, 0)).unwrap();
        run(&mut state, &config, Action::select_attack(TeamId::One, AttackKind::Normal)).unwrap();
        run(&mut state, &config, Action::select_target(TeamId::One, 2)).unwrap();
        let token = state.turn.pending_flip.unwrap();

        let outcome = run(&mut state, &config, Action::complete_turn(token)).unwrap();

        let ActionResult::TurnCompleted(change) = outcome.result else {
            panic!("expected turn change");
        };
        assert_eq!(change.reason, FlipReason::Resolved);
        assert_eq!(state.turn.current, TeamId::Two);
        assert_eq!(state.turn.time_left, 120);
        assert_eq!(state.turn.selected_attack, None);
        assert_eq!(state.turn.pending_flip, None);
    }

    #[test]
    fn stale_and_missing_flips_are_rejected() {
        let config = BattleConfig::default();
        let mut state = battle(&config);

        let error = run(&mut state, &config, Action::complete_turn(FlipToken(0))).unwrap_err();
        assert_eq!(error.error(), &ActionError::NoPendingFlip);

        run(&mut state, &config, Action::select_attacker(TeamId::One, 0)).unwrap();
        run(&mut state, &config, Action::select_attack(TeamId::One, AttackKind::Normal)).unwrap();
        run(&mut state, &config, Action::select_target(TeamId::One, 2)).unwrap();
        let token = state.turn.pending_flip.unwrap();

        let stale = FlipToken(token.0 + 100);
        let error = run(&mut state, &config, Action::complete_turn(stale)).unwrap_err();
        assert!(matches!(error.error(), ActionError::StaleFlip { .. }));
        assert_eq!(state.turn.current, TeamId::One);

        run(&mut state, &config, Action::complete_turn(token)).unwrap();
        let error = run(&mut state, &config, Action::complete_turn(token)).unwrap_err();
        assert_eq!(error.error(), &ActionError::NoPendingFlip);
        assert_eq!(state.turn.current, TeamId::Two);
    }

    #[test]
    fn idle_turn_flips_after_full_countdown() {
        let config = BattleConfig::default();
        let mut state = battle(&config);

        for _ in 0..119 {
            run(&mut state, &config, Action::tick()).unwrap();
        }
        assert_eq!(state.turn.current, TeamId::One);
        assert_eq!(state.turn.time_left, 1);

        run(&mut state, &config, Action::tick()).unwrap();
        assert_eq!(state.turn.current, TeamId::Two);
        assert_eq!(state.turn.time_left, 120);
        assert_eq!(state.turn.selected_attacker, None);
        assert_eq!(state.scores[TeamId::One], 0);
        assert_eq!(state.scores[TeamId::Two], 0);
    }
}
