//! Golden scenario loader for coherence engine integration tests.
//!
//! Scenarios live under `golden/` next to this crate's manifest. Each one is a
//! hypothesis worth of artifacts plus loosely-typed expectations.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// One artifact to store before the scenario runs. `phase` is the raw label.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactFixture {
    pub artifact_id: String,
    pub phase: String,
    pub name: String,
    pub content: String,
}

/// A relevance query issued against the seeded hypothesis.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryFixture {
    pub phase: String,
    pub candidate_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFixture {
    pub description: String,
    pub hypothesis_id: String,
    pub artifacts: Vec<ArtifactFixture>,
    #[serde(default)]
    pub query: Option<QueryFixture>,
    #[serde(default)]
    pub expected: serde_json::Value,
}

/// Load `golden/scenarios/{name}.json`.
pub fn load_scenario(name: &str) -> ScenarioFixture {
    load_fixture(&format!("golden/scenarios/{name}.json"))
}
