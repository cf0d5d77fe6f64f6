//! Built-in roster shipped with the game.

use standoff_core::error::Result;

use crate::catalog::ArchetypeCatalog;

/// Embedded definitions as `(source name, RON text)`.
pub const BUILTIN_SOURCES: [(&str, &str); 2] = [
    ("jotaro.ron", include_str!("../data/jotaro.ron")),
    ("dio.ron", include_str!("../data/dio.ron")),
];

pub const JOTARO: &str = "jotaro";
pub const DIO: &str = "dio";

/// Catalog holding every built-in archetype.
pub fn builtin_catalog() -> Result<ArchetypeCatalog> {
    let mut catalog = ArchetypeCatalog::new();
    for (name, text) in BUILTIN_SOURCES {
        catalog.load_str(name, text)?;
    }
    Ok(catalog)
}
