use std::collections::HashMap;

use coherence_core::config::*;
use coherence_core::errors::ConfigError;
use proptest::prelude::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CoherenceConfig::from_toml("").unwrap();

    // Embedding defaults
    assert_eq!(config.embedding.dimensions, 256);
    assert_eq!(config.embedding.min_token_chars, 3);

    // Retrieval defaults
    assert_eq!(config.retrieval.top_k, 5);
    assert_eq!(config.retrieval.min_similarity, 0.05);
    assert_eq!(config.retrieval.terminology_size, 8);
    assert_eq!(config.retrieval.constraint_threshold, 0.6);
    assert!(config.retrieval.query_includes_phase);

    // Coherence defaults
    assert_eq!(config.coherence.weak_below, 0.4);
    assert_eq!(config.coherence.strong_from, 0.7);
    assert_eq!(config.coherence.phase_action_below, 0.5);
    assert_eq!(config.coherence.transition_action_below, 0.4);

    // Storage defaults
    assert_eq!(config.storage.backend, "memory");
    assert_eq!(config.storage.db_path, "coherence.db");
    assert_eq!(config.storage.read_pool_size, 4);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[embedding]
dimensions = 512

[retrieval]
top_k = 3
query_includes_phase = false

[storage]
backend = "sqlite"
db_path = "/var/lib/coherence/ctx.db"
"#;
    let config = CoherenceConfig::from_toml(toml).unwrap();
    assert_eq!(config.embedding.dimensions, 512);
    assert_eq!(config.embedding.min_token_chars, 3); // default
    assert_eq!(config.retrieval.top_k, 3);
    assert!(!config.retrieval.query_includes_phase);
    assert_eq!(config.retrieval.terminology_size, 8); // default
    assert_eq!(config.storage.backend, "sqlite");
    assert_eq!(config.storage.db_path, "/var/lib/coherence/ctx.db");
}

#[test]
fn config_serde_roundtrip() {
    let config = CoherenceConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = CoherenceConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.embedding.dimensions, config.embedding.dimensions);
    assert_eq!(roundtripped.storage.backend, config.storage.backend);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = CoherenceConfig::from_toml("[embedding\ndimensions = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn zero_dimensions_rejected() {
    let err = CoherenceConfig::from_toml("[embedding]\ndimensions = 0").unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "embedding.dimensions"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn out_of_range_threshold_rejected() {
    let err = CoherenceConfig::from_toml("[retrieval]\nmin_similarity = 1.5").unwrap_err();
    assert!(err.to_string().contains("retrieval.min_similarity"));
}

#[test]
fn weak_above_strong_rejected() {
    let toml = "[coherence]\nweak_below = 0.8\nstrong_from = 0.6";
    assert!(CoherenceConfig::from_toml(toml).is_err());
}

#[test]
fn env_overrides_apply_and_ignore_garbage() {
    let env: HashMap<&str, &str> = [
        ("COHERENCE_DIMENSIONS", "128"),
        ("COHERENCE_TOP_K", "not-a-number"),
        ("COHERENCE_STORAGE_BACKEND", "sqlite"),
        ("COHERENCE_QUERY_INCLUDES_PHASE", "false"),
    ]
    .into_iter()
    .collect();

    let mut config = CoherenceConfig::default();
    config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.embedding.dimensions, 128);
    assert_eq!(config.retrieval.top_k, 5);
    assert_eq!(config.storage.backend, "sqlite");
    assert!(!config.retrieval.query_includes_phase);
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coherence.toml");
    std::fs::write(&path, "[retrieval]\nterminology_size = 12\n").unwrap();

    let config = CoherenceConfig::load(&path).unwrap();
    assert_eq!(config.retrieval.terminology_size, 12);
}

#[test]
fn load_missing_file_is_a_read_error() {
    let err = CoherenceConfig::load(std::path::Path::new("/nonexistent/coherence.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

proptest! {
    #[test]
    fn prop_ordered_unit_thresholds_validate(weak in 0.0f64..=1.0, strong in 0.0f64..=1.0) {
        let mut config = CoherenceConfig::default();
        config.coherence.weak_below = weak.min(strong);
        config.coherence.strong_from = weak.max(strong);
        prop_assert!(config.validate().is_ok());
    }

    #[test]
    fn prop_out_of_range_similarity_floor_is_rejected(floor in 1.0001f64..100.0) {
        let mut config = CoherenceConfig::default();
        config.retrieval.min_similarity = floor;
        let err = config.validate().unwrap_err();
        prop_assert!(err.to_string().contains("retrieval.min_similarity"));
    }
}
