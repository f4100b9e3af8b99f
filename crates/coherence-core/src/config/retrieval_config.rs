use serde::{Deserialize, Serialize};

use super::defaults;

/// Relevance ranker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Results kept per partition (same phase / other phases).
    pub top_k: usize,
    /// Results must score strictly above this cosine similarity to be kept.
    pub min_similarity: f64,
    /// Number of terminology entries in the guidelines.
    pub terminology_size: usize,
    /// Same-phase results above this similarity become consistency constraints.
    pub constraint_threshold: f64,
    /// Append the target phase label to the candidate name when building the query.
    pub query_includes_phase: bool,
    /// Max chars of content copied into each ranked entry.
    pub excerpt_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
            terminology_size: defaults::DEFAULT_TERMINOLOGY_SIZE,
            constraint_threshold: defaults::DEFAULT_CONSTRAINT_THRESHOLD,
            query_includes_phase: defaults::DEFAULT_QUERY_INCLUDES_PHASE,
            excerpt_chars: defaults::DEFAULT_EXCERPT_CHARS,
        }
    }
}
