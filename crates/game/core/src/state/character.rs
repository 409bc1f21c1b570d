use crate::attack::AttackStats;

/// A combatant in one team slot.
///
/// Health only moves down during a battle and never leaves
/// `0..=max_health`. A character is defeated once health reaches zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    name: String,
    health: u32,
    max_health: u32,
    attacks: Option<AttackStats>,
}

impl Character {
    /// Creates a character at full health without attack stats.
    pub fn new(name: impl Into<String>, max_health: u32) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            attacks: None,
        }
    }

    #[must_use]
    pub fn with_attacks(mut self, attacks: AttackStats) -> Self {
        self.attacks = Some(attacks);
        self
    }

    /// Overrides the starting health, clamped to `max_health`.
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attacks(&self) -> Option<&AttackStats> {
        self.attacks.as_ref()
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub(crate) fn set_health(&mut self, health: u32) {
        debug_assert!(health <= self.health, "health must not increase in battle");
        self.health = health.min(self.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_full_health() {
        let rai = Character::new("Rai", 10);
        assert_eq!(rai.health(), 10);
        assert_eq!(rai.max_health(), 10);
        assert!(!rai.is_defeated());
        assert!(rai.attacks().is_none());
    }

    #[test]
    fn with_health_is_clamped() {
        let rai = Character::new("Rai", 10).with_health(25);
        assert_eq!(rai.health(), 10);

        let down = Character::new("Rai", 10).with_health(0);
        assert!(down.is_defeated());
    }
}
