//! Player intents: choose an attacker, an attack and a target.
//!
//! Turn ownership, resolving and game-over checks run in the engine before
//! any of these transitions; the hooks here only check selection order and
//! the chosen characters.

use crate::action::{
    ActionError, ActionResult, ActionTransition, ScheduledFlip, TargetResolution,
};
use crate::attack::AttackKind;
use crate::combat::HitOutcome;
use crate::config::BattleConfig;
use crate::engine::StateReducer;
use crate::state::{BattleResult, BattleState, FlipToken, SlotIndex};

/// Picks the acting team's attacker. Replaces an earlier pick as long as no
/// attack has been chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectAttackerAction {
    pub slot: SlotIndex,
}

impl SelectAttackerAction {
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot }
    }
}

impl ActionTransition for SelectAttackerAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        if state.turn.selected_attack.is_some() {
            return Err(ActionError::AttackAlreadySelected);
        }

        let attacker = state
            .acting_team()
            .member(self.slot)
            .ok_or(ActionError::SlotOutOfRange { slot: self.slot })?;
        if attacker.is_defeated() {
            return Err(ActionError::AttackerDefeated { slot: self.slot });
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        config: &BattleConfig,
    ) -> Result<Self::Result, Self::Error> {
        let attacker = state
            .acting_team()
            .member(self.slot)
            .ok_or(ActionError::SlotOutOfRange { slot: self.slot })?;
        let options = config.attack_source.options(attacker)?;

        StateReducer::new(state).turn().select_attacker(self.slot);

        Ok(ActionResult::AttackerSelected {
            slot: self.slot,
            options,
        })
    }
}

/// Chooses one of the selected attacker's three attacks. No damage yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectAttackAction {
    pub kind: AttackKind,
}

impl SelectAttackAction {
    pub fn new(kind: AttackKind) -> Self {
        Self { kind }
    }
}

impl ActionTransition for SelectAttackAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        if state.turn.selected_attacker.is_none() {
            return Err(ActionError::NoAttackerSelected);
        }
        if state.turn.selected_attack.is_some() {
            return Err(ActionError::AttackAlreadySelected);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        config: &BattleConfig,
    ) -> Result<Self::Result, Self::Error> {
        let attacker = state.attacker().ok_or(ActionError::NoAttackerSelected)?;
        let attack = config.attack_source.resolve(attacker, self.kind)?;

        StateReducer::new(state).turn().select_attack(attack.clone());

        Ok(ActionResult::AttackSelected(attack))
    }

    fn post_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        debug_assert!(
            state.turn.selected_attacker.is_some(),
            "an attack is never stored without an attacker"
        );
        Ok(())
    }
}

/// Backs out of the attack choice and releases the attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CancelAttackAction;

impl ActionTransition for CancelAttackAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        if state.turn.selected_attacker.is_none() {
            return Err(ActionError::NoAttackerSelected);
        }
        if state.turn.selected_attack.is_some() {
            return Err(ActionError::AttackAlreadySelected);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _config: &BattleConfig,
    ) -> Result<Self::Result, Self::Error> {
        StateReducer::new(state).turn().clear_selection();
        Ok(ActionResult::AttackCancelled)
    }
}

/// Resolves the selected attack against a character of the opposing team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectTargetAction {
    pub slot: SlotIndex,
}

impl SelectTargetAction {
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot }
    }
}

impl ActionTransition for SelectTargetAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn pre_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        if state.turn.selected_attack.is_none() {
            return Err(ActionError::NoAttackSelected);
        }

        let target = state
            .defending_team()
            .member(self.slot)
            .ok_or(ActionError::TargetOutOfRange { slot: self.slot })?;
        if target.is_defeated() {
            return Err(ActionError::TargetDefeated { slot: self.slot });
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        config: &BattleConfig,
    ) -> Result<Self::Result, Self::Error> {
        let acting = state.turn.current;
        let defending = acting.opposite();
        let attacker = state
            .turn
            .selected_attacker
            .ok_or(ActionError::NoAttackerSelected)?;
        let attack = state
            .turn
            .selected_attack
            .clone()
            .ok_or(ActionError::NoAttackSelected)?;
        let previous_health = state
            .defending_team()
            .member(self.slot)
            .ok_or(ActionError::TargetOutOfRange { slot: self.slot })?
            .health();

        let hit = HitOutcome::new(defending, self.slot, attack.damage, previous_health);
        let token = FlipToken(state.turn.nonce);
        let number = state.turn.number;

        let mut reducer = StateReducer::new(state);
        reducer.team(defending).set_health(self.slot, hit.health);
        if hit.defeated {
            reducer.award_point(acting);
        }

        let (scheduled, result) = if reducer.state().teams[defending].is_defeated() {
            let result = BattleResult {
                winner: acting,
                turns: number,
            };
            reducer.finish(result);
            (None, Some(result))
        } else {
            reducer.turn().schedule_flip(token);
            let scheduled = ScheduledFlip {
                token,
                delay_ms: config.resolve_delay_ms,
            };
            (Some(scheduled), None)
        };

        Ok(ActionResult::TargetResolved(TargetResolution {
            attacker,
            attack,
            scored: hit.defeated,
            hit,
            scheduled,
            result,
        }))
    }

    fn post_validate(&self, state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        debug_assert!(
            state
                .defending_team()
                .members()
                .iter()
                .all(|member| member.health() <= member.max_health()),
            "health stays within 0..=max_health"
        );
        Ok(())
    }
}
