//! Runtime orchestration for the battle state machine.
//!
//! This crate wires the pure [`game_core`] engine into async tasks: a single
//! owner task holds the battle state and applies commands in arrival order,
//! a clock task feeds countdown ticks, and deferred turn flips are scheduled
//! as cancellable timers. Consumers embed [`Runtime`] and interact with the
//! battle through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{BattleEvent, Event, EventBus, MatchEvent, Topic, TurnEvent};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
