//! Static battle content and loaders.
//!
//! This crate houses the fixed character roster and the team-building rules
//! that turn roster picks into the two [`game_core::Team`]s a battle starts
//! with. With the `loaders` feature it also reads the roster from RON and the
//! battle configuration from TOML.
//!
//! Content is consumed when a battle is created and never appears in battle
//! state beyond the characters it produces.

pub mod lineup;
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use lineup::{Lineup, LineupBuilder, LineupError};
pub use roster::{Roster, RosterEntry};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
