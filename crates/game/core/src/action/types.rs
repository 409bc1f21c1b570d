//! Results reported by executed actions.
//!
//! The engine never sleeps or reads a clock. When an action needs something
//! to happen later (the deferred flip), the result says so and the caller
//! schedules it.

use crate::attack::Attack;
use crate::combat::HitOutcome;
use crate::state::{BattleResult, FlipToken, SlotIndex, TeamId};

/// Why the turn changed hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipReason {
    /// A hit resolved and its deferred flip completed.
    Resolved,
    /// The countdown reached zero before a target was chosen.
    TimedOut,
}

/// A completed turn flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnChange {
    pub previous: TeamId,
    pub current: TeamId,
    /// Number of the turn that just started.
    pub number: u32,
    pub reason: FlipReason,
}

/// A flip the caller must trigger with `CompleteTurn` after `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledFlip {
    pub token: FlipToken,
    pub delay_ms: u64,
}

/// Everything a resolved target selection produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetResolution {
    pub attacker: SlotIndex,
    pub attack: Attack,
    pub hit: HitOutcome,
    /// True when the hit awarded the acting team a point.
    pub scored: bool,
    /// `None` when the hit ended the battle.
    pub scheduled: Option<ScheduledFlip>,
    pub result: Option<BattleResult>,
}

/// Outcome of a clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickResult {
    /// Countdown decremented; `time_left` remains.
    Counting { time_left: u32 },
    /// A hit is resolving, the countdown did not move.
    Paused,
    /// The countdown expired and the turn was forfeited.
    Expired(TurnChange),
}

/// Action-specific result returned by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    AttackerSelected {
        slot: SlotIndex,
        options: Vec<Attack>,
    },
    AttackSelected(Attack),
    AttackCancelled,
    TargetResolved(TargetResolution),
    Tick(TickResult),
    TurnCompleted(TurnChange),
}

impl ActionResult {
    /// The turn change this result reports, if any.
    pub fn turn_change(&self) -> Option<TurnChange> {
        match self {
            ActionResult::Tick(TickResult::Expired(change)) | ActionResult::TurnCompleted(change) => {
                Some(*change)
            }
            _ => None,
        }
    }

    pub fn battle_result(&self) -> Option<BattleResult> {
        match self {
            ActionResult::TargetResolved(resolution) => resolution.result,
            _ => None,
        }
    }
}
