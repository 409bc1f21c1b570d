//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a battle.

use std::env;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use game_content::Lineup;
use game_core::{AttackCatalog, AttackSource, BattleConfig, BattleState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{ClockWorker, Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Period of one countdown tick.
    pub tick_interval_ms: u64,
    /// Spawn the clock worker. Without it, ticks come from the handle.
    pub auto_tick: bool,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            tick_interval_ms: 1000,
            auto_tick: true,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_TURN_DURATION` - Countdown ticks per turn (default: 120)
    /// - `BATTLE_RESOLVE_DELAY_MS` - Pause before the turn flips after a hit (default: 500)
    /// - `BATTLE_ATTACK_SOURCE` - `per_character` or `shared` (default: per_character)
    /// - `BATTLE_TICK_INTERVAL_MS` - Clock period (default: 1000)
    /// - `BATTLE_AUTO_TICK` - Run the clock worker (default: true)
    /// - `BATTLE_EVENT_BUFFER` - Event capacity per topic (default: 100)
    /// - `BATTLE_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Overrides fields from the environment, keeping current values for
    /// variables that are unset or fail to parse.
    #[must_use]
    pub fn apply_env(self) -> Self {
        let mut config = self;

        if let Some(ticks) = read_env::<u32>("BATTLE_TURN_DURATION") {
            config.battle = config.battle.with_turn_duration(ticks);
        }
        if let Some(delay_ms) = read_env::<u64>("BATTLE_RESOLVE_DELAY_MS") {
            config.battle = config.battle.with_resolve_delay_ms(delay_ms);
        }
        if let Ok(source) = env::var("BATTLE_ATTACK_SOURCE") {
            match source.to_lowercase().as_str() {
                "shared" => {
                    config.battle = config
                        .battle
                        .with_attack_source(AttackSource::Shared(AttackCatalog::default()));
                }
                "per_character" => {
                    config.battle = config.battle.with_attack_source(AttackSource::PerCharacter);
                }
                other => {
                    tracing::warn!(
                        target: "runtime::config",
                        "Unknown BATTLE_ATTACK_SOURCE '{}', keeping {:?}",
                        other,
                        config.battle.attack_source
                    );
                }
            }
        }

        if let Some(interval) = read_env::<u64>("BATTLE_TICK_INTERVAL_MS") {
            config.tick_interval_ms = interval.max(1);
        }
        if let Some(enable) = read_env_bool("BATTLE_AUTO_TICK") {
            config.auto_tick = enable;
        }
        if let Some(capacity) = read_env::<usize>("BATTLE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("BATTLE_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Main runtime that orchestrates a battle
///
/// Design: Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
    clock_worker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the workers once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        if let Some(clock_handle) = self.clock_worker_handle {
            clock_handle.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<BattleState>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the battle from a completed lineup.
    ///
    /// Uses the battle configuration set so far, so call after [`Self::config`].
    pub fn lineup(mut self, lineup: Lineup) -> Self {
        self.state = Some(lineup.into_battle(&self.config.battle));
        self
    }

    /// Provide initial battle state
    pub fn initial_state(mut self, state: BattleState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the runtime
    ///
    /// Must be called inside a tokio runtime; workers are spawned here.
    pub async fn build(self) -> Result<Runtime> {
        let initial_state = self.state.ok_or(RuntimeError::MissingBattle)?;
        let initial_result = initial_state.result;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (result_tx, result_rx) = watch::channel(initial_result);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx.clone(), event_bus.clone(), result_rx.clone());

        let sim_worker = SimulationWorker::new(
            initial_state,
            self.config.battle.clone(),
            command_rx,
            command_tx.downgrade(),
            event_bus,
            result_tx,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        let clock_worker_handle = if self.config.auto_tick && initial_result.is_none() {
            let clock_worker =
                ClockWorker::new(self.config.tick_interval(), command_tx.downgrade(), result_rx);

            Some(tokio::spawn(async move {
                clock_worker.run().await;
            }))
        } else {
            None
        };

        Ok(Runtime {
            handle,
            sim_worker_handle,
            clock_worker_handle,
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_the_clock_every_second() {
        let config = RuntimeConfig::default();
        assert!(config.auto_tick);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.battle, BattleConfig::default());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = RuntimeConfig {
            tick_interval_ms: 0,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn unset_variables_keep_current_values() {
        let config = RuntimeConfig {
            command_buffer_size: 7,
            ..RuntimeConfig::default()
        };
        if env::var("BATTLE_COMMAND_BUFFER").is_err() {
            assert_eq!(config.apply_env().command_buffer_size, 7);
        }
    }
}
