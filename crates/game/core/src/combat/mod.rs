//! Hit resolution.
mod damage;

pub use damage::apply_damage;

use crate::state::{SlotIndex, TeamId};

/// What a single resolved hit did to its target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitOutcome {
    pub target: TeamId,
    pub slot: SlotIndex,
    pub damage: u32,
    pub previous_health: u32,
    pub health: u32,
    /// True only when this hit took the target from alive to zero.
    pub defeated: bool,
}

impl HitOutcome {
    pub fn new(target: TeamId, slot: SlotIndex, damage: u32, previous_health: u32) -> Self {
        let health = apply_damage(previous_health, damage);
        Self {
            target,
            slot,
            damage,
            previous_health,
            health,
            defeated: previous_health > 0 && health == 0,
        }
    }

    /// Health actually removed, which is less than `damage` on overkill.
    pub fn dealt(&self) -> u32 {
        self.previous_health - self.health
    }
}
