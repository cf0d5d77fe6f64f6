//! Configuration errors raised while loading archetypes or building a match.
//!
//! Runtime rejections (an attack while dashing, a summon without meter) are not
//! errors: ability calls return `false` and leave the fighter untouched.

use thiserror::Error;

use crate::enums::AttackSlot;

/// Data-integrity problems in archetype definitions or match setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),

    #[error("archetype '{archetype}' defines unknown action '{name}'")]
    UnknownAction { archetype: String, name: String },

    #[error("archetype '{archetype}' is missing required action '{action}'")]
    MissingAction {
        archetype: String,
        action: &'static str,
    },

    #[error("archetype '{archetype}' is missing {form} attack spec for slot {}", slot.number())]
    MissingAttack {
        archetype: String,
        form: &'static str,
        slot: AttackSlot,
    },

    #[error("archetype '{archetype}' has invalid frame range {start}..={end} for '{what}'")]
    InvalidFrameRange {
        archetype: String,
        what: String,
        start: u16,
        end: u16,
    },

    #[error("archetype '{archetype}' has zero playback speed for '{action}'")]
    ZeroSpeed { archetype: String, action: String },

    #[error("archetype '{archetype}': {message}")]
    InvalidValue { archetype: String, message: String },

    #[error("failed to parse archetype data '{source_name}': {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("duplicate archetype id '{0}'")]
    DuplicateArchetype(String),

    #[error("saved match state is invalid: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
