//! Fixtures shared by the inline test modules.

use crate::action::Action;
use crate::attack::AttackStats;
use crate::config::BattleConfig;
use crate::engine::{BattleEngine, ExecuteError, ExecutionOutcome};
use crate::state::{BattleState, Character, Team};

fn fighter(name: &str, normal: u32, power: u32, super_attack: u32) -> Character {
    Character::new(name, 10).with_attacks(AttackStats::new(normal, power, super_attack))
}

pub fn team_one() -> Team {
    Team::new([
        fighter("Rai", 3, 3, 5),
        fighter("Kitsumi", 2, 5, 6),
        fighter("Ioshiro", 3, 3, 4),
    ])
}

pub fn team_two() -> Team {
    Team::new([
        fighter("Namae", 3, 4, 6),
        fighter("Vkhuu", 2, 4, 5),
        fighter("Kiota", 3, 4, 4),
    ])
}

pub fn battle(config: &BattleConfig) -> BattleState {
    BattleState::new(team_one(), team_two(), config)
}

pub fn run(
    state: &mut BattleState,
    config: &BattleConfig,
    action: Action,
) -> Result<ExecutionOutcome, ExecuteError> {
    BattleEngine::new(state).execute(config, &action)
}
