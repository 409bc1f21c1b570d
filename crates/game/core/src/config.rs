use crate::attack::AttackSource;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Length of a turn countdown, in clock ticks.
    pub turn_duration: u32,

    /// Delay between a resolved hit and the turn flip, in milliseconds.
    ///
    /// The engine only reports this value; waiting is the runtime's job.
    pub resolve_delay_ms: u64,

    /// Where an attacker's three attacks come from.
    pub attack_source: AttackSource,
}

impl BattleConfig {
    // ===== compile-time constants =====
    /// Number of characters on each team.
    pub const TEAM_SIZE: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_DURATION: u32 = 120;
    pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 500;

    pub fn new() -> Self {
        Self {
            turn_duration: Self::DEFAULT_TURN_DURATION,
            resolve_delay_ms: Self::DEFAULT_RESOLVE_DELAY_MS,
            attack_source: AttackSource::PerCharacter,
        }
    }

    /// Sets the turn countdown. A zero duration is raised to one tick.
    #[must_use]
    pub fn with_turn_duration(mut self, ticks: u32) -> Self {
        self.turn_duration = ticks.max(1);
        self
    }

    #[must_use]
    pub fn with_resolve_delay_ms(mut self, delay_ms: u64) -> Self {
        self.resolve_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_attack_source(mut self, source: AttackSource) -> Self {
        self.attack_source = source;
        self
    }

    /// Turn duration as used by the engine (never zero).
    pub fn effective_turn_duration(&self) -> u32 {
        self.turn_duration.max(1)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::AttackCatalog;

    #[test]
    fn defaults_match_turn_rules() {
        let config = BattleConfig::default();
        assert_eq!(config.turn_duration, 120);
        assert_eq!(config.resolve_delay_ms, 500);
        assert_eq!(config.attack_source, AttackSource::PerCharacter);
    }

    #[test]
    fn zero_duration_is_raised() {
        let config = BattleConfig::new().with_turn_duration(0);
        assert_eq!(config.turn_duration, 1);
    }

    #[test]
    fn builder_sets_shared_catalog() {
        let config = BattleConfig::new()
            .with_resolve_delay_ms(0)
            .with_attack_source(AttackSource::Shared(AttackCatalog::default()));

        assert_eq!(config.resolve_delay_ms, 0);
        assert!(matches!(config.attack_source, AttackSource::Shared(_)));
    }
}
