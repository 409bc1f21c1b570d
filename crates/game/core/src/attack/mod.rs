//! Attack categories and the sources they are resolved from.
//!
//! Every attacker offers exactly three attacks, one per [`AttackKind`]. The
//! damage either comes from the attacker's own [`AttackStats`] or from a
//! shared [`AttackCatalog`], selected through [`AttackSource`] in the battle
//! configuration.

use strum::IntoEnumIterator;

use crate::action::ActionError;
use crate::state::Character;

/// The three attack categories.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    Normal,
    Power,
    Super,
}

impl AttackKind {
    /// Display label used when an attack is generated from character stats.
    pub const fn label(self) -> &'static str {
        match self {
            AttackKind::Normal => "Normal Attack",
            AttackKind::Power => "Power Attack",
            AttackKind::Super => "Super Attack",
        }
    }

    /// Presentational icon identifier.
    pub const fn icon(self) -> &'static str {
        match self {
            AttackKind::Normal => "Sword",
            AttackKind::Power => "Zap",
            AttackKind::Super => "Flame",
        }
    }
}

/// A resolved attack ready to be applied to a target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub kind: AttackKind,
    pub name: String,
    pub damage: u32,
    pub icon: String,
}

impl Attack {
    pub fn new(kind: AttackKind, name: impl Into<String>, damage: u32, icon: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            damage,
            icon: icon.into(),
        }
    }
}

/// Per-character damage values, one per attack kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackStats {
    pub normal: u32,
    pub power: u32,
    #[cfg_attr(feature = "serde", serde(rename = "super"))]
    pub super_attack: u32,
}

impl AttackStats {
    pub const fn new(normal: u32, power: u32, super_attack: u32) -> Self {
        Self {
            normal,
            power,
            super_attack,
        }
    }

    pub const fn damage(&self, kind: AttackKind) -> u32 {
        match kind {
            AttackKind::Normal => self.normal,
            AttackKind::Power => self.power,
            AttackKind::Super => self.super_attack,
        }
    }

    /// Builds the attack of the given kind with the default label and icon.
    pub fn attack(&self, kind: AttackKind) -> Attack {
        Attack::new(kind, kind.label(), self.damage(kind), kind.icon())
    }
}

/// One entry of a shared attack catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackSpec {
    pub name: String,
    pub damage: u32,
    pub icon: String,
}

impl AttackSpec {
    pub fn new(name: impl Into<String>, damage: u32, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage,
            icon: icon.into(),
        }
    }
}

/// Three named attacks shared by every character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackCatalog {
    pub normal: AttackSpec,
    pub power: AttackSpec,
    #[cfg_attr(feature = "serde", serde(rename = "super"))]
    pub super_attack: AttackSpec,
}

impl AttackCatalog {
    pub fn spec(&self, kind: AttackKind) -> &AttackSpec {
        match kind {
            AttackKind::Normal => &self.normal,
            AttackKind::Power => &self.power,
            AttackKind::Super => &self.super_attack,
        }
    }

    pub fn attack(&self, kind: AttackKind) -> Attack {
        let spec = self.spec(kind);
        Attack::new(kind, spec.name.clone(), spec.damage, spec.icon.clone())
    }
}

impl Default for AttackCatalog {
    fn default() -> Self {
        Self {
            normal: AttackSpec::new("Strike", 10, AttackKind::Normal.icon()),
            power: AttackSpec::new("Power Strike", 20, AttackKind::Power.icon()),
            super_attack: AttackSpec::new("Super Strike", 35, AttackKind::Super.icon()),
        }
    }
}

/// Where attacks are resolved from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttackSource {
    /// Damage comes from each character's [`AttackStats`].
    #[default]
    PerCharacter,

    /// Every character uses the same catalog.
    Shared(AttackCatalog),
}

impl AttackSource {
    /// Resolves the attack of `kind` for `attacker`.
    pub fn resolve(&self, attacker: &Character, kind: AttackKind) -> Result<Attack, ActionError> {
        match self {
            AttackSource::PerCharacter => attacker
                .attacks()
                .map(|stats| stats.attack(kind))
                .ok_or(ActionError::MissingAttackStats),
            AttackSource::Shared(catalog) => Ok(catalog.attack(kind)),
        }
    }

    /// All three attacks available to `attacker`, in kind order.
    pub fn options(&self, attacker: &Character) -> Result<Vec<Attack>, ActionError> {
        AttackKind::iter()
            .map(|kind| self.resolve(attacker, kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_character_source_uses_stats() {
        let rai = Character::new("Rai", 10).with_attacks(AttackStats::new(3, 3, 5));
        let attack = AttackSource::PerCharacter
            .resolve(&rai, AttackKind::Super)
            .unwrap();

        assert_eq!(attack.damage, 5);
        assert_eq!(attack.name, "Super Attack");
        assert_eq!(attack.icon, "Flame");
    }

    #[test]
    fn per_character_source_requires_stats() {
        let plain = Character::new("Plain", 100);
        assert_eq!(
            AttackSource::PerCharacter.resolve(&plain, AttackKind::Normal),
            Err(ActionError::MissingAttackStats)
        );
    }

    #[test]
    fn shared_catalog_ignores_character_stats() {
        let source = AttackSource::Shared(AttackCatalog::default());
        let options = source.options(&Character::new("Plain", 100)).unwrap();

        let damages: Vec<u32> = options.iter().map(|attack| attack.damage).collect();
        assert_eq!(damages, vec![10, 20, 35]);
        assert_eq!(options[1].name, "Power Strike");
    }

    #[test]
    fn options_are_in_kind_order() {
        let kiota = Character::new("Kiota", 10).with_attacks(AttackStats::new(3, 4, 4));
        let kinds: Vec<AttackKind> = AttackSource::PerCharacter
            .options(&kiota)
            .unwrap()
            .into_iter()
            .map(|attack| attack.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![AttackKind::Normal, AttackKind::Power, AttackKind::Super]
        );
    }
}
