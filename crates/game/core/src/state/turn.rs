use crate::attack::Attack;

use super::{SlotIndex, TeamId};

/// Identifies one scheduled post-resolution flip.
///
/// A `CompleteTurn` carrying any other token is stale and is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipToken(pub u64);

/// Turn bookkeeping: whose turn it is, what has been selected so far and how
/// much time is left.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// The acting team.
    pub current: TeamId,

    /// 1-based turn counter, incremented on every flip.
    pub number: u32,

    /// Slot of the acting team's chosen attacker.
    pub selected_attacker: Option<SlotIndex>,

    /// Attack chosen by the attacker. Never set without an attacker.
    pub selected_attack: Option<Attack>,

    /// Remaining countdown ticks for this turn.
    pub time_left: u32,

    /// Set while a resolved hit waits for its deferred flip.
    pub pending_flip: Option<FlipToken>,

    /// Number of transitions applied so far.
    pub nonce: u64,
}

impl TurnState {
    pub fn new(turn_duration: u32) -> Self {
        Self {
            current: TeamId::One,
            number: 1,
            selected_attacker: None,
            selected_attack: None,
            time_left: turn_duration,
            pending_flip: None,
            nonce: 0,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_attacker = None;
        self.selected_attack = None;
    }
}
