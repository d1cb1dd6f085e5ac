//! Test fixtures for the aftershock workspace: JSON catalogs on disk and
//! deterministic synthetic aftershock sequences.

pub mod synthetic;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

use aftershock_core::EventCatalog;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a catalog fixture from `fixtures/catalogs/`.
pub fn load_catalog(name: &str) -> EventCatalog {
    load_fixture(&format!("catalogs/{name}"))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_fixtures_resolve_under_the_fixture_root() {
        let path = fixture_path("catalogs/bam_2003.json");
        assert!(path.starts_with(fixtures_root()));
        assert!(path.is_file(), "missing {}", path.display());
        assert!(!load_catalog("bam_2003.json").is_empty());
    }
}
