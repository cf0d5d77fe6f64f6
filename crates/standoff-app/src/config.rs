//! Loading match configuration and extra archetypes from disk.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use standoff_roster::profiles::builtin_catalog;
use standoff_roster::ArchetypeCatalog;
use standoff_sim::MatchConfig;

use crate::error::{AppError, Result};

/// Read a RON `MatchConfig`. Missing fields take their defaults.
pub fn load_match_config(path: &Path) -> Result<MatchConfig> {
    let text = read(path)?;
    parse_match_config(path, &text)
}

pub fn parse_match_config(path: &Path, text: &str) -> Result<MatchConfig> {
    let config: MatchConfig = ron::from_str(text).map_err(|e| AppError::Ron {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), p1 = %config.p1, p2 = %config.p2, "match config loaded");
    Ok(config)
}

/// The built-in roster plus every `.ron` archetype found in `dir`.
pub fn load_catalog(dir: Option<&Path>) -> Result<ArchetypeCatalog> {
    let mut catalog = builtin_catalog()?;
    let Some(dir) = dir else {
        return Ok(catalog);
    };
    let entries = fs::read_dir(dir).map_err(|source| AppError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    // Directory order is platform dependent.
    paths.sort();
    for path in paths {
        let text = read(&path)?;
        catalog.load_str(&path.display().to_string(), &text)?;
    }
    info!(dir = %dir.display(), archetypes = catalog.len(), "archetype catalog loaded");
    Ok(catalog)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_match_config(
            &PathBuf::from("match.ron"),
            r#"(p1: "dio", intro_ticks: 0, stage: (width: 1000.0))"#,
        )
        .unwrap();
        assert_eq!(config.p1, "dio");
        assert_eq!(config.p2, "dio");
        assert_eq!(config.intro_ticks, 0);
        assert_eq!(config.stage.width, 1000.0);
        assert_eq!(config.stage.ground_level, MatchConfig::default().stage.ground_level);
    }

    #[test]
    fn test_bad_config_reports_path() {
        let err = parse_match_config(&PathBuf::from("broken.ron"), "(p1: 7").unwrap_err();
        assert!(matches!(err, AppError::Ron { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_match_config(Path::new("/nonexistent/standoff/match.ron")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_catalog_without_extra_dir() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["dio", "jotaro"]);
    }
}
