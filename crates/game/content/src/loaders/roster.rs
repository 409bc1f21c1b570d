//! Roster loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::roster::{Roster, RosterEntry};

/// Loader for the character roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<RosterEntry>`
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let entries: Vec<RosterEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if entries.is_empty() {
            anyhow::bail!("Roster is empty");
        }

        for entry in &entries {
            let stats = entry.attack_stats();
            if [stats.normal, stats.power, stats.super_attack].contains(&0) {
                anyhow::bail!("Character '{}' has an attack with zero damage", entry.name);
            }
        }

        let roster = Roster::new(entries.iter().cloned());
        if roster.len() != entries.len() {
            anyhow::bail!("Roster contains duplicate character names");
        }

        Ok(roster)
    }
}
