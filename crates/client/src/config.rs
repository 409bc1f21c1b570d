//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Which target the autoplay frontend hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Targeting {
    /// Finish off the most wounded defender.
    #[default]
    LowestHealth,
    /// Always the first defender still standing.
    FirstAlive,
}

impl std::str::FromStr for Targeting {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "lowest_health" => Ok(Self::LowestHealth),
            "first_alive" => Ok(Self::FirstAlive),
            other => Err(format!("unknown targeting '{other}'")),
        }
    }
}

/// Settings for the composition root and the autoplay frontend.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `roster.ron` and `battle.toml`. Built-in content is
    /// used when unset.
    pub content_dir: Option<PathBuf>,
    pub team_one: Vec<String>,
    pub team_two: Vec<String>,
    /// Pause between consecutive intents.
    pub think_ms: u64,
    pub targeting: Targeting,
    /// Also write logs to `battle.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            team_one: names(["Rai", "Kitsumi", "Ioshiro"]),
            team_two: names(["Namae", "Vkhuu", "Kiota"]),
            think_ms: 300,
            targeting: Targeting::default(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Content directory (default: built-in roster)
    /// - `BATTLE_TEAM_ONE` - Comma-separated names for Team 1
    /// - `BATTLE_TEAM_TWO` - Comma-separated names for Team 2
    /// - `BATTLE_THINK_MS` - Delay between intents (default: 300)
    /// - `BATTLE_TARGETING` - `lowest_health` or `first_alive` (default: lowest_health)
    /// - `BATTLE_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_CONTENT_DIR") {
            config.content_dir = Some(PathBuf::from(dir));
        }
        if let Some(team) = read_names("BATTLE_TEAM_ONE") {
            config.team_one = team;
        }
        if let Some(team) = read_names("BATTLE_TEAM_TWO") {
            config.team_two = team;
        }
        if let Some(think_ms) = read_env::<u64>("BATTLE_THINK_MS") {
            config.think_ms = think_ms;
        }
        if let Some(targeting) = read_env::<Targeting>("BATTLE_TARGETING") {
            config.targeting = targeting;
        }
        if let Ok(dir) = env::var("BATTLE_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config
    }

    pub fn think_time(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }
}

/// Splits a comma-separated list, dropping blank entries.
pub fn parse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

fn names<const N: usize>(names: [&str; N]) -> Vec<String> {
    names.into_iter().map(str::to_owned).collect()
}

fn read_names(key: &str) -> Option<Vec<String>> {
    let names = parse_names(&env::var(key).ok()?);
    (!names.is_empty()).then_some(names)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
