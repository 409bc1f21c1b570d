//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the battle state and executes commands, while
//! the clock worker feeds it countdown ticks.

mod clock;
mod simulation;

pub use clock::ClockWorker;
pub use simulation::{Command, SimulationWorker};
