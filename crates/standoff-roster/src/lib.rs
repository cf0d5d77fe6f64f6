//! Fighter roster for STANDOFF.
//!
//! Parses RON archetype definitions, validates them, and serves the compiled
//! archetypes by id through an [`ArchetypeCatalog`].

pub mod catalog;
pub mod definition;
pub mod profiles;

pub use catalog::ArchetypeCatalog;
pub use standoff_core as core;

#[cfg(test)]
mod tests;
