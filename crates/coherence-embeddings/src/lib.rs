//! # coherence-embeddings
//!
//! Local, dependency-free text vectors for the coherence engine.
//!
//! ```text
//! text ──► tokenizer ──► HashingVectorizer ──► raw TF vector [D]
//!                                             │
//!                   (at comparison time)      ▼
//!                          idf reweight ─► L2 normalize ─► cosine
//! ```
//!
//! Raw vectors are stored unnormalized so they stay valid as the
//! per-hypothesis IDF changes.

pub mod similarity;
pub mod tokenizer;
pub mod vectorizer;

pub use similarity::{cosine_similarity, l2_normalize, reweight};
pub use tokenizer::Tokenizer;
pub use vectorizer::{Embedding, HashingVectorizer};
