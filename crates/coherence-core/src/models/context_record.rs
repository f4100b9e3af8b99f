use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Phase;

/// The most frequent source token that hashed into one bucket of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTerm {
    pub term: String,
    pub count: u32,
}

/// Derived data computed once when the record is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// blake3 hex of the embedded text.
    pub content_hash: String,
    /// Tokens kept by the tokenizer.
    pub token_count: usize,
    /// Bucket index → dominant source token, for mapping dimensions back to words.
    pub bucket_terms: BTreeMap<usize, BucketTerm>,
}

/// One stored artifact, keyed by `(hypothesis_id, artifact_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub hypothesis_id: String,
    pub artifact_id: String,
    pub phase: Phase,
    pub name: String,
    /// Raw text snapshot used for human-readable output.
    pub content: String,
    /// Raw term-frequency counts, length D. Never normalized in storage.
    pub vector: Vec<f32>,
    pub metadata: RecordMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContextRecord {
    /// The text that gets embedded for this record.
    pub fn embedding_text(name: &str, content: &str) -> String {
        format!("{name}\n{content}")
    }

    /// Whether the record would embed to the same vector as the given inputs.
    pub fn matches_content(&self, phase: Phase, name: &str, content_hash: &str) -> bool {
        self.phase == phase && self.name == name && self.metadata.content_hash == content_hash
    }
}
