//! Core types and definitions for the STANDOFF combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! archetype data, input intents, state snapshots, events, and constants.
//! It has no dependency on any runtime, renderer, or input device.

pub mod archetype;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
