//! Engine configuration with layered resolution.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`COHERENCE_*`)
//! 2. TOML file passed to [`CoherenceConfig::load`]
//! 3. Compiled defaults (`defaults.rs`)

mod coherence_config;
pub mod defaults;
mod embedding_config;
mod observability_config;
mod retrieval_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use coherence_config::CoherenceThresholds;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceConfig {
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub coherence: CoherenceThresholds,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl CoherenceConfig {
    /// Parse a TOML string. Missing sections and keys fall back to defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, then apply `COHERENCE_*` environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            reason: format!("{}: {e}", path.display()),
        })?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Unparseable values are ignored and the previous value is kept.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("COHERENCE_DIMENSIONS").and_then(|v| v.parse().ok()) {
            self.embedding.dimensions = v;
        }
        if let Some(v) = lookup("COHERENCE_TOP_K").and_then(|v| v.parse().ok()) {
            self.retrieval.top_k = v;
        }
        if let Some(v) = lookup("COHERENCE_QUERY_INCLUDES_PHASE").and_then(|v| v.parse().ok()) {
            self.retrieval.query_includes_phase = v;
        }
        if let Some(v) = lookup("COHERENCE_STORAGE_BACKEND") {
            self.storage.backend = v;
        }
        if let Some(v) = lookup("COHERENCE_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("COHERENCE_JSON_LOGS").and_then(|v| v.parse().ok()) {
            self.observability.json_logs = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be greater than 0"));
        }
        if self.retrieval.top_k == 0 {
            return Err(invalid("retrieval.top_k", "must be greater than 0"));
        }
        let unit_fields = [
            ("retrieval.min_similarity", self.retrieval.min_similarity),
            ("retrieval.constraint_threshold", self.retrieval.constraint_threshold),
            ("coherence.weak_below", self.coherence.weak_below),
            ("coherence.strong_from", self.coherence.strong_from),
            ("coherence.phase_action_below", self.coherence.phase_action_below),
            (
                "coherence.transition_action_below",
                self.coherence.transition_action_below,
            ),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "must be between 0.0 and 1.0"));
            }
        }
        if self.coherence.weak_below > self.coherence.strong_from {
            return Err(invalid(
                "coherence.weak_below",
                "must not exceed coherence.strong_from",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
