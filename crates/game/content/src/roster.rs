//! The fixed character roster.
//!
//! Each entry carries three base stats. In the per-character variant the
//! stats derive the three attack values; in the shared-catalog variant only
//! the name is used.

use game_core::{AttackSource, AttackStats, BattleConfig, Character};

/// A selectable character and its base stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub name: String,
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
}

impl RosterEntry {
    /// Starting health when attacks come from character stats.
    pub const STAT_HEALTH: u32 = 10;

    /// Starting health when every character shares one attack catalog.
    pub const CATALOG_HEALTH: u32 = 100;

    pub fn new(name: impl Into<String>, strength: u32, agility: u32, intelligence: u32) -> Self {
        Self {
            name: name.into(),
            strength,
            agility,
            intelligence,
        }
    }

    /// Normal from strength, power from agility, super from intelligence.
    pub fn attack_stats(&self) -> AttackStats {
        AttackStats::new(
            self.strength.div_ceil(3),
            self.agility.div_ceil(2),
            super_damage(self.intelligence),
        )
    }

    /// Builds the battle character for the configured attack source.
    pub fn character(&self, config: &BattleConfig) -> Character {
        match config.attack_source {
            AttackSource::PerCharacter => Character::new(self.name.clone(), Self::STAT_HEALTH)
                .with_attacks(self.attack_stats()),
            AttackSource::Shared(_) => Character::new(self.name.clone(), Self::CATALOG_HEALTH),
        }
    }
}

fn super_damage(intelligence: u32) -> u32 {
    let damage = (u64::from(intelligence) * 2).div_ceil(3);
    u32::try_from(damage).unwrap_or(u32::MAX)
}

/// Ordered collection of selectable characters with unique names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Builds a roster, keeping the first entry for any repeated name.
    pub fn new(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut unique: Vec<RosterEntry> = Vec::new();
        for entry in entries {
            if !unique.iter().any(|existing| existing.name == entry.name) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    /// The six built-in characters.
    pub fn standard() -> Self {
        Self::new([
            RosterEntry::new("Rai", 8, 6, 7),
            RosterEntry::new("Kitsumi", 5, 9, 8),
            RosterEntry::new("Ioshiro", 9, 5, 6),
            RosterEntry::new("Namae", 7, 7, 9),
            RosterEntry::new("Vkhuu", 6, 8, 7),
            RosterEntry::new("Kiota", 8, 7, 6),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}
