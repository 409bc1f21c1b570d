//! Battle configuration loader.

use std::path::Path;

use game_core::{AttackSource, BattleConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
///
/// Missing keys fall back to [`BattleConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if let AttackSource::Shared(catalog) = &config.attack_source {
            for spec in [&catalog.normal, &catalog.power, &catalog.super_attack] {
                if spec.damage == 0 {
                    anyhow::bail!("Shared attack '{}' has zero damage", spec.name);
                }
            }
        }

        Ok(config)
    }
}
