//! Archetype catalog: compiled archetypes looked up by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use ron::extensions::Extensions;
use ron::Options;
use tracing::debug;

use standoff_core::archetype::Archetype;
use standoff_core::error::{ConfigError, Result};

use crate::definition::ArchetypeDef;

/// RON options shared by every archetype file.
fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Parse one archetype definition without compiling it.
pub fn parse_definition(source_name: &str, text: &str) -> Result<ArchetypeDef> {
    ron_options()
        .from_str(text)
        .map_err(|e| ConfigError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
}

/// Read-only table of archetypes shared by every fighter of each type.
#[derive(Debug, Clone, Default)]
pub struct ArchetypeCatalog {
    archetypes: BTreeMap<String, Arc<Archetype>>,
}

impl ArchetypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse, compile, and register the archetype in `text`.
    pub fn load_str(&mut self, source_name: &str, text: &str) -> Result<Arc<Archetype>> {
        let def = parse_definition(source_name, text)?;
        self.insert(def.compile()?)
    }

    /// Register a compiled archetype. Ids must be unique.
    pub fn insert(&mut self, archetype: Archetype) -> Result<Arc<Archetype>> {
        if self.archetypes.contains_key(&archetype.id) {
            return Err(ConfigError::DuplicateArchetype(archetype.id));
        }
        debug!(
            id = %archetype.id,
            actions = archetype.clips.len(),
            stand = %archetype.stand.display_name,
            "archetype registered"
        );
        let archetype = Arc::new(archetype);
        self.archetypes
            .insert(archetype.id.clone(), Arc::clone(&archetype));
        Ok(archetype)
    }

    pub fn get(&self, id: &str) -> Result<Arc<Archetype>> {
        self.archetypes
            .get(id)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownArchetype(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.archetypes.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.archetypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}
