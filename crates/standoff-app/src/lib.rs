//! STANDOFF headless harness.
//!
//! Wires the roster and the simulation together: loads configuration, runs the
//! fixed-rate game loop on its own thread, and drives the scripted demo bout.

pub mod config;
pub mod demo;
pub mod error;
pub mod game_loop;
pub mod state;

pub use standoff_core as core;
pub use error::{AppError, Result};
