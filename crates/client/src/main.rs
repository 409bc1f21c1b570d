//! Battle client binary.
//!
//! Composition root that assembles:
//! 1. Content (roster and battle config, built-in or from `BATTLE_CONTENT_DIR`)
//! 2. Runtime via `Runtime::builder()`
//! 3. The autoplay frontend
//!
//! # Examples
//!
//! ```bash
//! # Default match with a 1s clock
//! cargo run -p battle-client
//!
//! # Shared attack catalog, faster clock, targets in slot order
//! BATTLE_ATTACK_SOURCE=shared BATTLE_TICK_INTERVAL_MS=200 \
//!     BATTLE_TARGETING=first_alive cargo run -p battle-client
//! ```

use anyhow::{Context, Result};

use battle_client::{AutoplayFrontend, Client, ClientConfig, logging};
use game_content::{ContentFactory, Lineup, LineupBuilder, Roster};
use game_core::{BattleConfig, TeamId};
use runtime::{Runtime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let client_config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(client_config.log_dir.as_deref())?;

    let (roster, runtime_config) = load_content(&client_config)?;
    let lineup = build_lineup(&roster, &client_config, &runtime_config.battle)?;

    tracing::info!("Starting battle");
    tracing::info!("Team 1: {}", client_config.team_one.join(", "));
    tracing::info!("Team 2: {}", client_config.team_two.join(", "));
    tracing::info!(
        "Turn: {} ({} ms per tick)",
        runtime_config.battle.turn_duration,
        runtime_config.tick_interval_ms
    );

    let runtime = Runtime::builder()
        .config(runtime_config)
        .lineup(lineup)
        .build()
        .await?;

    let frontend = AutoplayFrontend::new(
        client_config.targeting.strategy(),
        client_config.think_time(),
    );

    Client::builder()
        .runtime(runtime)
        .frontend(frontend)
        .build()?
        .run()
        .await
}

/// Roster and runtime config, with environment overrides applied last.
fn load_content(config: &ClientConfig) -> Result<(Roster, RuntimeConfig)> {
    let Some(content_dir) = &config.content_dir else {
        return Ok((Roster::standard(), RuntimeConfig::from_env()));
    };

    let factory = ContentFactory::new(content_dir);
    let roster = factory.load_roster()?;
    let battle = factory.load_config()?;
    tracing::info!("Content loaded from {}", factory.data_dir().display());

    let runtime_config = RuntimeConfig {
        battle,
        ..RuntimeConfig::default()
    }
    .apply_env();

    Ok((roster, runtime_config))
}

fn build_lineup(roster: &Roster, config: &ClientConfig, battle: &BattleConfig) -> Result<Lineup> {
    let mut builder = LineupBuilder::new(roster);

    for (team, names) in [(TeamId::One, &config.team_one), (TeamId::Two, &config.team_two)] {
        for (slot, name) in names.iter().enumerate() {
            builder
                .assign(team, slot, name)
                .with_context(|| format!("cannot place '{name}' on {team}"))?;
        }
    }

    builder.build(battle).context("incomplete lineup")
}
