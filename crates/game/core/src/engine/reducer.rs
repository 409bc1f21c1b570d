use crate::action::{FlipReason, TurnChange};
use crate::attack::Attack;
use crate::state::{BattleResult, BattleState, FlipToken, SlotIndex, Team, TeamId, TurnState};

/// Wraps mutable access to [`BattleState`] with structured sub-reducers.
pub struct StateReducer<'a> {
    state: &'a mut BattleState,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn turn(&mut self) -> TurnReducer<'_> {
        TurnReducer {
            turn: &mut self.state.turn,
        }
    }

    pub fn team(&mut self, id: TeamId) -> TeamReducer<'_> {
        TeamReducer {
            team: &mut self.state.teams[id],
        }
    }

    /// Awards one point to `team` and returns the new score.
    pub fn award_point(&mut self, team: TeamId) -> u32 {
        let score = &mut self.state.scores[team];
        *score += 1;
        *score
    }

    /// Enters the terminal state. Selections and any pending flip are dropped.
    pub fn finish(&mut self, result: BattleResult) {
        let turn = &mut self.state.turn;
        turn.clear_selection();
        turn.pending_flip = None;
        self.state.result = Some(result);
    }
}

pub struct TurnReducer<'a> {
    turn: &'a mut TurnState,
}

impl<'a> TurnReducer<'a> {
    pub fn select_attacker(&mut self, slot: SlotIndex) {
        self.turn.selected_attacker = Some(slot);
    }

    pub fn select_attack(&mut self, attack: Attack) {
        debug_assert!(self.turn.selected_attacker.is_some());
        self.turn.selected_attack = Some(attack);
    }

    pub fn clear_selection(&mut self) {
        self.turn.clear_selection();
    }

    pub fn schedule_flip(&mut self, token: FlipToken) {
        self.turn.pending_flip = Some(token);
    }

    /// Decrements the countdown and returns the remaining ticks.
    pub fn count_down(&mut self) -> u32 {
        self.turn.time_left = self.turn.time_left.saturating_sub(1);
        self.turn.time_left
    }

    /// Hands the turn to the other team with a fresh countdown.
    pub fn flip(&mut self, reason: FlipReason, turn_duration: u32) -> TurnChange {
        let previous = self.turn.current;
        self.turn.current = previous.opposite();
        self.turn.clear_selection();
        self.turn.pending_flip = None;
        self.turn.time_left = turn_duration;
        self.turn.number += 1;

        TurnChange {
            previous,
            current: self.turn.current,
            number: self.turn.number,
            reason,
        }
    }
}

pub struct TeamReducer<'a> {
    team: &'a mut Team,
}

impl<'a> TeamReducer<'a> {
    /// Sets a member's health and returns the previous value.
    pub fn set_health(&mut self, slot: SlotIndex, health: u32) -> Option<u32> {
        let member = self.team.member_mut(slot)?;
        let previous = member.health();
        member.set_health(health);
        Some(previous)
    }
}
