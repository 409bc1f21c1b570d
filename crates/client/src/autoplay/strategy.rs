//! Target choice for the autoplay frontend.

use game_core::{BattleState, SlotIndex};

use crate::config::Targeting;

/// Picks which defender the acting team hits.
///
/// Implementations must be deterministic and only return living slots.
pub trait TargetingStrategy: Send + Sync {
    /// Returns `None` when every defender is defeated.
    fn select_target(&self, state: &BattleState) -> Option<SlotIndex>;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

/// Target the defender with the lowest health percentage.
///
/// Ties go to the lowest slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestHealthStrategy;

impl TargetingStrategy for LowestHealthStrategy {
    fn select_target(&self, state: &BattleState) -> Option<SlotIndex> {
        let defenders = state.defending_team();
        defenders.alive_slots().min_by_key(|&slot| {
            defenders
                .member(slot)
                .map_or(u64::MAX, |member| health_per_mille(member.health(), member.max_health()))
        })
    }

    fn name(&self) -> &'static str {
        "Lowest Health"
    }
}

/// Target the first defender still standing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAliveStrategy;

impl TargetingStrategy for FirstAliveStrategy {
    fn select_target(&self, state: &BattleState) -> Option<SlotIndex> {
        state.defending_team().alive_slots().next()
    }

    fn name(&self) -> &'static str {
        "First Alive"
    }
}

impl Targeting {
    pub fn strategy(self) -> Box<dyn TargetingStrategy> {
        match self {
            Targeting::LowestHealth => Box::new(LowestHealthStrategy),
            Targeting::FirstAlive => Box::new(FirstAliveStrategy),
        }
    }
}

fn health_per_mille(health: u32, max_health: u32) -> u64 {
    if max_health == 0 {
        return 0;
    }
    u64::from(health) * 1000 / u64::from(max_health)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{BattleConfig, Character, Team};

    fn team(healths: [u32; 3]) -> Team {
        Team::new(healths.map(|health| Character::new("C", 10).with_health(health)))
    }

    fn battle(defenders: [u32; 3]) -> BattleState {
        BattleState::new(team([10, 10, 10]), team(defenders), &BattleConfig::default())
    }

    #[test]
    fn lowest_health_skips_defeated() {
        let state = battle([0, 7, 4]);
        assert_eq!(LowestHealthStrategy.select_target(&state), Some(2));
    }

    #[test]
    fn lowest_health_breaks_ties_by_slot() {
        let state = battle([6, 6, 10]);
        assert_eq!(LowestHealthStrategy.select_target(&state), Some(0));
    }

    #[test]
    fn first_alive_walks_in_slot_order() {
        let state = battle([0, 0, 3]);
        assert_eq!(FirstAliveStrategy.select_target(&state), Some(2));
        assert_eq!(FirstAliveStrategy.select_target(&battle([0, 0, 0])), None);
    }
}
