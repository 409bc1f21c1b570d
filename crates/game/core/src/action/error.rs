//! Action rejection errors.
//!
//! Every rejection is a policy violation: the engine leaves the battle state
//! exactly as it was before the action.

use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{FlipToken, SlotIndex, TeamId};

/// Reasons an action can be rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// A player action was issued by the team that is not acting.
    #[error("{team} acted during {current}'s turn")]
    NotYourTurn { team: TeamId, current: TeamId },

    /// The attacker slot does not exist on the acting team.
    #[error("slot {slot} is out of range")]
    SlotOutOfRange { slot: SlotIndex },

    /// The chosen attacker has zero health.
    #[error("attacker in slot {slot} is defeated")]
    AttackerDefeated { slot: SlotIndex },

    /// The attacker is locked once an attack has been chosen.
    #[error("an attack is already selected")]
    AttackAlreadySelected,

    /// An attack was chosen before an attacker.
    #[error("no attacker selected")]
    NoAttackerSelected,

    /// A target was chosen before an attack.
    #[error("no attack selected")]
    NoAttackSelected,

    /// The target slot does not exist on the defending team.
    #[error("target slot {slot} is out of range")]
    TargetOutOfRange { slot: SlotIndex },

    /// The target has zero health.
    #[error("target in slot {slot} is already defeated")]
    TargetDefeated { slot: SlotIndex },

    /// A hit is resolving; the turn flips shortly.
    #[error("turn is resolving")]
    TurnResolving,

    /// The battle has a winner; nothing else is accepted.
    #[error("battle is over")]
    BattleOver,

    /// A deferred flip that was cancelled or superseded fired anyway.
    #[error("stale flip token {token:?} (pending {pending:?})")]
    StaleFlip {
        token: FlipToken,
        pending: Option<FlipToken>,
    },

    /// `CompleteTurn` arrived while no flip was scheduled.
    #[error("no flip is pending")]
    NoPendingFlip,

    /// Per-character attacks are configured but the attacker has none.
    #[error("attacker has no attack stats")]
    MissingAttackStats,
}

impl GameError for ActionError {
    fn kind(&self) -> ErrorKind {
        use ActionError::*;
        match self {
            TargetOutOfRange { .. } | TargetDefeated { .. } => ErrorKind::InvalidTarget,
            NotYourTurn { .. }
            | SlotOutOfRange { .. }
            | AttackerDefeated { .. }
            | AttackAlreadySelected
            | NoAttackerSelected
            | NoAttackSelected
            | TurnResolving
            | BattleOver
            | StaleFlip { .. }
            | NoPendingFlip
            | MissingAttackStats => ErrorKind::IllegalTransition,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            NotYourTurn { .. } | TurnResolving | StaleFlip { .. } => ErrorSeverity::Recoverable,
            SlotOutOfRange { .. }
            | AttackerDefeated { .. }
            | TargetOutOfRange { .. }
            | TargetDefeated { .. }
            | AttackAlreadySelected
            | NoAttackerSelected
            | NoAttackSelected
            | BattleOver
            | NoPendingFlip => ErrorSeverity::Validation,
            MissingAttackStats => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            NotYourTurn { .. } => "ACTION_NOT_YOUR_TURN",
            SlotOutOfRange { .. } => "ACTION_SLOT_OUT_OF_RANGE",
            AttackerDefeated { .. } => "ACTION_ATTACKER_DEFEATED",
            AttackAlreadySelected => "ACTION_ATTACK_ALREADY_SELECTED",
            NoAttackerSelected => "ACTION_NO_ATTACKER_SELECTED",
            NoAttackSelected => "ACTION_NO_ATTACK_SELECTED",
            TargetOutOfRange { .. } => "ACTION_TARGET_OUT_OF_RANGE",
            TargetDefeated { .. } => "ACTION_TARGET_DEFEATED",
            TurnResolving => "ACTION_TURN_RESOLVING",
            BattleOver => "ACTION_BATTLE_OVER",
            StaleFlip { .. } => "ACTION_STALE_FLIP",
            NoPendingFlip => "ACTION_NO_PENDING_FLIP",
            MissingAttackStats => "ACTION_MISSING_ATTACK_STATS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_target_side_errors_are_invalid_targets() {
        for error in [
            ActionError::TargetDefeated { slot: 1 },
            ActionError::TargetOutOfRange { slot: 3 },
        ] {
            assert_eq!(error.kind(), ErrorKind::InvalidTarget);
        }
        for error in [
            ActionError::AttackerDefeated { slot: 0 },
            ActionError::SlotOutOfRange { slot: 3 },
        ] {
            assert_eq!(error.kind(), ErrorKind::IllegalTransition);
        }
    }

    #[test]
    fn ordering_violations_are_illegal_transitions() {
        for error in [
            ActionError::NoAttackSelected,
            ActionError::NoAttackerSelected,
            ActionError::NotYourTurn {
                team: TeamId::Two,
                current: TeamId::One,
            },
        ] {
            assert_eq!(error.kind(), ErrorKind::IllegalTransition);
        }
    }

    #[test]
    fn display_names_teams() {
        let error = ActionError::NotYourTurn {
            team: TeamId::Two,
            current: TeamId::One,
        };
        assert_eq!(error.to_string(), "Team 2 acted during Team 1's turn");
        assert_eq!(error.error_code(), "ACTION_NOT_YOUR_TURN");
    }
}
