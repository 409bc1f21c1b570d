//! Action domain.
//!
//! Player actions carry the issuing team and cover the four selection
//! intents of a turn. System actions are issued by the owner of the clock:
//! `Tick` advances the countdown and `CompleteTurn` performs a deferred flip.
//!
//! # Module Structure
//!
//! - `error`: [`ActionError`], the rejection reasons
//! - `types`: [`ActionResult`] and the values it carries
//! - `player`: transitions for player intents
//! - `system`: transitions for clock ticks and deferred flips

pub mod error;
pub mod player;
pub mod system;
pub mod types;

pub use error::ActionError;
pub use player::{CancelAttackAction, SelectAttackAction, SelectAttackerAction, SelectTargetAction};
pub use system::{CompleteTurnAction, TickAction};
pub use types::{ActionResult, FlipReason, ScheduledFlip, TargetResolution, TickResult, TurnChange};

use crate::attack::AttackKind;
use crate::config::BattleConfig;
use crate::state::{BattleState, FlipToken, SlotIndex, TeamId};

/// Defines how a concrete action variant mutates battle state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive the battle configuration read-only and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the battle state directly.
    fn apply(
        &self,
        state: &mut BattleState,
        config: &BattleConfig,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &BattleState, _config: &BattleConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Player intent variants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerActionKind {
    SelectAttacker(SelectAttackerAction),
    SelectAttack(SelectAttackAction),
    CancelAttack(CancelAttackAction),
    SelectTarget(SelectTargetAction),
}

/// A player intent together with the team that issued it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerAction {
    pub team: TeamId,
    pub kind: PlayerActionKind,
}

/// System action variants (clock and deferred flip).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemActionKind {
    Tick(TickAction),
    CompleteTurn(CompleteTurnAction),
}

/// Top-level action enum that can be either a player action or system action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Player(PlayerAction),
    System { kind: SystemActionKind },
}

impl Action {
    pub fn player(team: TeamId, kind: PlayerActionKind) -> Self {
        Self::Player(PlayerAction { team, kind })
    }

    pub fn system(kind: SystemActionKind) -> Self {
        Self::System { kind }
    }

    pub fn select_attacker(team: TeamId, slot: SlotIndex) -> Self {
        Self::player(team, SelectAttackerAction::new(slot).into())
    }

    pub fn select_attack(team: TeamId, kind: AttackKind) -> Self {
        Self::player(team, SelectAttackAction::new(kind).into())
    }

    pub fn cancel_attack(team: TeamId) -> Self {
        Self::player(team, CancelAttackAction.into())
    }

    pub fn select_target(team: TeamId, slot: SlotIndex) -> Self {
        Self::player(team, SelectTargetAction::new(slot).into())
    }

    pub fn tick() -> Self {
        Self::system(TickAction.into())
    }

    pub fn complete_turn(token: FlipToken) -> Self {
        Self::system(CompleteTurnAction::new(token).into())
    }

    /// The issuing team for player actions.
    pub fn team(&self) -> Option<TeamId> {
        match self {
            Action::Player(action) => Some(action.team),
            Action::System { .. } => None,
        }
    }

    /// Returns the snake_case name of the action, used in logs and event keys.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Player(action) => match action.kind {
                PlayerActionKind::SelectAttacker(_) => "select_attacker",
                PlayerActionKind::SelectAttack(_) => "select_attack",
                PlayerActionKind::CancelAttack(_) => "cancel_attack",
                PlayerActionKind::SelectTarget(_) => "select_target",
            },
            Action::System { kind } => match kind {
                SystemActionKind::Tick(_) => "tick",
                SystemActionKind::CompleteTurn(_) => "complete_turn",
            },
        }
    }
}

impl From<SelectAttackerAction> for PlayerActionKind {
    fn from(action: SelectAttackerAction) -> Self {
        Self::SelectAttacker(action)
    }
}

impl From<SelectAttackAction> for PlayerActionKind {
    fn from(action: SelectAttackAction) -> Self {
        Self::SelectAttack(action)
    }
}

impl From<CancelAttackAction> for PlayerActionKind {
    fn from(action: CancelAttackAction) -> Self {
        Self::CancelAttack(action)
    }
}

impl From<SelectTargetAction> for PlayerActionKind {
    fn from(action: SelectTargetAction) -> Self {
        Self::SelectTarget(action)
    }
}

impl From<TickAction> for SystemActionKind {
    fn from(action: TickAction) -> Self {
        Self::Tick(action)
    }
}

impl From<CompleteTurnAction> for SystemActionKind {
    fn from(action: CompleteTurnAction) -> Self {
        Self::CompleteTurn(action)
    }
}
