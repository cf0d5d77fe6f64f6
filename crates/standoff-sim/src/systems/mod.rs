//! ECS systems that operate on the match world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; everything lives in the fighter components.

pub mod animation;
pub mod combat;
pub mod facing;
pub mod input;
pub mod locomotion;
pub mod match_flow;
pub mod snapshot;
pub mod stand;
pub mod timers;
