use serde::{Deserialize, Serialize};

use super::defaults;

/// Hashing vectorizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Vector length D. Changing it invalidates stored vectors.
    pub dimensions: usize,
    /// Tokens with fewer chars than this are dropped.
    pub min_token_chars: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_DIMENSIONS,
            min_token_chars: defaults::DEFAULT_MIN_TOKEN_CHARS,
        }
    }
}
