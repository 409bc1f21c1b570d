//! Team building: fill two teams of three slots from the roster.
//!
//! A character can appear at most once across both teams. Re-assigning a
//! slot frees the character that held it.

use game_core::{BattleConfig, BattleState, Character, SlotIndex, Team, TeamId};

use crate::roster::Roster;

/// Reasons a lineup edit or build can fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LineupError {
    #[error("unknown character '{name}'")]
    UnknownCharacter { name: String },

    #[error("'{name}' is already on {team} in slot {slot}")]
    AlreadySelected {
        name: String,
        team: TeamId,
        slot: SlotIndex,
    },

    #[error("slot {slot} is out of range")]
    SlotOutOfRange { slot: SlotIndex },

    #[error("{team} slot {slot} is empty")]
    EmptySlot { team: TeamId, slot: SlotIndex },
}

/// Both teams, ready to start a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lineup {
    pub team_one: Team,
    pub team_two: Team,
}

impl Lineup {
    pub fn into_battle(self, config: &BattleConfig) -> BattleState {
        BattleState::new(self.team_one, self.team_two, config)
    }
}

type Slots = [Option<String>; BattleConfig::TEAM_SIZE];

/// Collects roster picks for both teams.
#[derive(Clone, Debug)]
pub struct LineupBuilder<'a> {
    roster: &'a Roster,
    slots: [Slots; 2],
}

impl<'a> LineupBuilder<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self {
            roster,
            slots: Default::default(),
        }
    }

    /// Puts `name` into `slot` of `team`, replacing whoever held it.
    pub fn assign(
        &mut self,
        team: TeamId,
        slot: SlotIndex,
        name: &str,
    ) -> Result<&mut Self, LineupError> {
        if slot >= BattleConfig::TEAM_SIZE {
            return Err(LineupError::SlotOutOfRange { slot });
        }
        if self.roster.get(name).is_none() {
            return Err(LineupError::UnknownCharacter {
                name: name.to_owned(),
            });
        }
        if let Some((held_team, held_slot)) = self.position_of(name)
            && (held_team, held_slot) != (team, slot)
        {
            return Err(LineupError::AlreadySelected {
                name: name.to_owned(),
                team: held_team,
                slot: held_slot,
            });
        }

        self.slots[team.index()][slot] = Some(name.to_owned());
        Ok(self)
    }

    /// Empties a slot and returns the character that held it.
    pub fn clear(&mut self, team: TeamId, slot: SlotIndex) -> Option<String> {
        self.slots[team.index()].get_mut(slot)?.take()
    }

    /// True when `name` already occupies any slot on either team.
    pub fn is_selected(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Roster names still free to pick.
    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.roster.names().filter(|name| !self.is_selected(name))
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().flatten().all(Option::is_some)
    }

    /// Builds both teams for the configured attack source.
    pub fn build(&self, config: &BattleConfig) -> Result<Lineup, LineupError> {
        Ok(Lineup {
            team_one: self.team(TeamId::One, config)?,
            team_two: self.team(TeamId::Two, config)?,
        })
    }

    fn team(&self, team: TeamId, config: &BattleConfig) -> Result<Team, LineupError> {
        let slots = &self.slots[team.index()];
        let character = |slot: SlotIndex| -> Result<Character, LineupError> {
            let name = slots[slot]
                .as_deref()
                .ok_or(LineupError::EmptySlot { team, slot })?;
            let entry = self
                .roster
                .get(name)
                .ok_or_else(|| LineupError::UnknownCharacter {
                    name: name.to_owned(),
                })?;
            Ok(entry.character(config))
        };

        Ok(Team::new([character(0)?, character(1)?, character(2)?]))
    }

    fn position_of(&self, name: &str) -> Option<(TeamId, SlotIndex)> {
        [TeamId::One, TeamId::Two].into_iter().find_map(|team| {
            self.slots[team.index()]
                .iter()
                .position(|held| held.as_deref() == Some(name))
                .map(|slot| (team, slot))
        })
    }
}
