//! Combat simulation for STANDOFF.
//!
//! Owns the hecs world holding both fighters, runs the systems once per tick,
//! and produces `MatchSnapshot`s for whoever renders the match.

pub mod animation;
pub mod engine;
pub mod fighter;
pub mod stand;
pub mod stats;
pub mod systems;
pub mod world_setup;

pub use standoff_core as core;
pub use engine::{MatchConfig, MatchEngine, MatchState, StageConfig};
pub use stats::MatchStats;

#[cfg(test)]
mod tests;
