//! Authoritative battle state representation.
//!
//! Runtime layers clone or query this state but mutate it exclusively through
//! the engine. The current phase is derived from the fields, never stored.
mod character;
mod team;
mod turn;

pub use character::Character;
pub use team::{PerTeam, SlotIndex, Team, TeamId};
pub use turn::{FlipToken, TurnState};

use crate::config::BattleConfig;

/// Terminal outcome of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub winner: TeamId,
    /// Turn number on which the last opposing character fell.
    pub turns: u32,
}

/// Where the acting team is in its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    AwaitingAttacker,
    AwaitingAttack,
    AwaitingTarget,
    /// A hit landed and the deferred flip has not happened yet.
    Resolving,
    GameOver,
}

/// Canonical snapshot of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub teams: PerTeam<Team>,
    pub turn: TurnState,
    /// Opposing characters defeated by each team.
    pub scores: PerTeam<u32>,
    pub result: Option<BattleResult>,
}

impl BattleState {
    /// Creates a fresh battle with Team 1 to act and a full countdown.
    pub fn new(team_one: Team, team_two: Team, config: &BattleConfig) -> Self {
        Self {
            teams: PerTeam::new(team_one, team_two),
            turn: TurnState::new(config.effective_turn_duration()),
            scores: PerTeam::new(0, 0),
            result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::GameOver
        } else if self.turn.pending_flip.is_some() {
            Phase::Resolving
        } else if self.turn.selected_attack.is_some() {
            Phase::AwaitingTarget
        } else if self.turn.selected_attacker.is_some() {
            Phase::AwaitingAttack
        } else {
            Phase::AwaitingAttacker
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn acting_team(&self) -> &Team {
        &self.teams[self.turn.current]
    }

    pub fn defending_team(&self) -> &Team {
        &self.teams[self.turn.current.opposite()]
    }

    /// The currently selected attacker, if any.
    pub fn attacker(&self) -> Option<&Character> {
        self.turn
            .selected_attacker
            .and_then(|slot| self.acting_team().member(slot))
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.result.map(|result| result.winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team::new([
            Character::new("a", 10),
            Character::new("b", 10),
            Character::new("c", 10),
        ])
    }

    #[test]
    fn new_battle_starts_with_team_one() {
        let config = BattleConfig::new().with_turn_duration(30);
        let state = BattleState::new(team(), team(), &config);

        assert_eq!(state.turn.current, TeamId::One);
        assert_eq!(state.turn.time_left, 30);
        assert_eq!(state.turn.number, 1);
        assert_eq!(state.phase(), Phase::AwaitingAttacker);
        assert_eq!(state.scores[TeamId::One], 0);
        assert!(!state.is_over());
    }

    #[test]
    fn phase_follows_selection() {
        let mut state = BattleState::new(team(), team(), &BattleConfig::default());

        state.turn.selected_attacker = Some(0);
        assert_eq!(state.phase(), Phase::AwaitingAttack);

        state.turn.pending_flip = Some(FlipToken(3));
        assert_eq!(state.phase(), Phase::Resolving);

        state.result = Some(BattleResult {
            winner: TeamId::Two,
            turns: 4,
        });
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.winner(), Some(TeamId::Two));
    }
}
