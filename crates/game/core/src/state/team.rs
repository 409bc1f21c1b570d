use core::ops::{Index, IndexMut};

use crate::config::BattleConfig;

use super::Character;

/// Position of a character within its team.
pub type SlotIndex = usize;

/// One of the two sides of a battle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamId {
    #[strum(to_string = "Team 1")]
    One,
    #[strum(to_string = "Team 2")]
    Two,
}

impl TeamId {
    pub const fn opposite(self) -> Self {
        match self {
            TeamId::One => TeamId::Two,
            TeamId::Two => TeamId::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            TeamId::One => 0,
            TeamId::Two => 1,
        }
    }
}

/// Exactly [`BattleConfig::TEAM_SIZE`] characters with stable slot indices.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    members: [Character; BattleConfig::TEAM_SIZE],
}

impl Team {
    pub fn new(members: [Character; BattleConfig::TEAM_SIZE]) -> Self {
        Self { members }
    }

    pub fn member(&self, slot: SlotIndex) -> Option<&Character> {
        self.members.get(slot)
    }

    pub(crate) fn member_mut(&mut self, slot: SlotIndex) -> Option<&mut Character> {
        self.members.get_mut(slot)
    }

    pub fn members(&self) -> &[Character] {
        &self.members
    }

    /// True when every member has zero health.
    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(Character::is_defeated)
    }

    pub fn alive_slots(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| !member.is_defeated())
            .map(|(slot, _)| slot)
    }
}

/// A value kept for each team, indexed by [`TeamId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerTeam<T>([T; 2]);

impl<T> PerTeam<T> {
    pub fn new(one: T, two: T) -> Self {
        Self([one, two])
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &T)> {
        [TeamId::One, TeamId::Two]
            .into_iter()
            .zip(self.0.iter())
    }
}

impl<T> Index<TeamId> for PerTeam<T> {
    type Output = T;

    fn index(&self, team: TeamId) -> &T {
        &self.0[team.index()]
    }
}

impl<T> IndexMut<TeamId> for PerTeam<T> {
    fn index_mut(&mut self, team: TeamId) -> &mut T {
        &mut self.0[team.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(healths: [u32; 3]) -> Team {
        Team::new(healths.map(|health| Character::new("c", 10).with_health(health)))
    }

    #[test]
    fn opposite_alternates() {
        assert_eq!(TeamId::One.opposite(), TeamId::Two);
        assert_eq!(TeamId::Two.opposite().opposite(), TeamId::Two);
        assert_eq!(TeamId::One.to_string(), "Team 1");
    }

    #[test]
    fn defeated_only_when_all_members_down() {
        assert!(!team([0, 0, 1]).is_defeated());
        assert!(team([0, 0, 0]).is_defeated());
        assert_eq!(team([0, 4, 1]).alive_slots().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn per_team_indexing() {
        let mut scores = PerTeam::new(0u32, 0u32);
        scores[TeamId::Two] += 2;
        assert_eq!(scores[TeamId::One], 0);
        assert_eq!(scores[TeamId::Two], 2);
    }
}
