//! Hashing-trick vectorizer.
//!
//! Maps each token to `fnv1a(token) % D` and counts occurrences. No global
//! vocabulary is kept, so D stays fixed as the corpus grows and old vectors
//! never need re-embedding. Different tokens may share a bucket.

use std::collections::{BTreeMap, HashMap};

use coherence_core::config::EmbeddingConfig;
use coherence_core::models::{BucketTerm, RecordMetadata};

use crate::tokenizer::Tokenizer;

/// A raw vector plus the metadata a context record keeps alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub metadata: RecordMetadata,
}

/// Bag-of-hashed-words vectorizer.
#[derive(Debug, Clone)]
pub struct HashingVectorizer {
    dimensions: usize,
    tokenizer: Tokenizer,
}

impl HashingVectorizer {
    /// # Panics
    /// Panics if `dimensions` is zero.
    pub fn new(dimensions: usize, tokenizer: Tokenizer) -> Self {
        assert!(dimensions > 0, "vector dimensions must be greater than 0");
        Self {
            dimensions,
            tokenizer,
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(config.dimensions, Tokenizer::new(config.min_token_chars))
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Hash a term into a bucket index using FNV-1a.
    pub fn bucket(&self, term: &str) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % self.dimensions as u64) as usize
    }

    /// Raw term-frequency vector of length D. Pure and infallible.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in self.tokenizer.tokenize(text) {
            vector[self.bucket(&token)] += 1.0;
        }
        vector
    }

    /// Embed and also build the bucket → dominant-token lookup.
    pub fn embed_with_terms(&self, text: &str) -> Embedding {
        let tokens = self.tokenizer.tokenize(text);
        let mut vector = vec![0.0f32; self.dimensions];
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            vector[self.bucket(token)] += 1.0;
            *counts.entry(token.as_str()).or_default() += 1;
        }

        let mut bucket_terms: BTreeMap<usize, BucketTerm> = BTreeMap::new();
        for (term, count) in counts {
            let bucket = self.bucket(term);
            let replace = match bucket_terms.get(&bucket) {
                None => true,
                Some(existing) => {
                    count > existing.count
                        || (count == existing.count && term < existing.term.as_str())
                }
            };
            if replace {
                bucket_terms.insert(
                    bucket,
                    BucketTerm {
                        term: term.to_string(),
                        count,
                    },
                );
            }
        }

        Embedding {
            vector,
            metadata: RecordMetadata {
                content_hash: content_hash(text),
                token_count: tokens.len(),
                bucket_terms,
            },
        }
    }
}

impl Default for HashingVectorizer {
    fn default() -> Self {
        Self::from_config(&EmbeddingConfig::default())
    }
}

/// blake3 hex digest of the embedded text.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
