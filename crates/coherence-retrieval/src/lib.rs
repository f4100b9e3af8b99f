//! # coherence-retrieval
//!
//! Read-side of the engine: IDF over a hypothesis corpus, ranking of prior
//! artifacts against a generation request, and the guidelines built from them.
//!
//! Nothing here is cached. Every call lists the hypothesis from the store and
//! recomputes IDF, so results always reflect the current record set.

pub mod corpus_stats;
pub mod guidelines;
pub mod ranker;

pub use corpus_stats::{compute_idf, CorpusStats};
pub use ranker::RelevanceRanker;
