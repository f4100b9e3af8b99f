//! RelevanceRanker: similarity of a generation request to prior artifacts.
//!
//! Pipeline: list hypothesis → IDF → weigh query and records → cosine →
//! order → partition by phase → floor + top-K → guidelines.

use std::cmp::Ordering;

use tracing::debug;

use coherence_core::config::{CoherenceConfig, RetrievalConfig};
use coherence_core::errors::CoherenceResult;
use coherence_core::models::{ContextRecord, Phase, RankedContext, RankedRecord};
use coherence_core::traits::IContextStore;
use coherence_embeddings::{cosine_similarity, HashingVectorizer};

use crate::corpus_stats::CorpusStats;
use crate::guidelines;

pub struct RelevanceRanker {
    vectorizer: HashingVectorizer,
    config: RetrievalConfig,
}

impl RelevanceRanker {
    pub fn new(vectorizer: HashingVectorizer, config: RetrievalConfig) -> Self {
        Self { vectorizer, config }
    }

    pub fn from_config(config: &CoherenceConfig) -> Self {
        Self::new(
            HashingVectorizer::from_config(&config.embedding),
            config.retrieval.clone(),
        )
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Text embedded for the query: the candidate name, plus the phase label
    /// when `query_includes_phase` is set.
    pub fn query_text(&self, phase: Phase, candidate_name: &str) -> String {
        if self.config.query_includes_phase {
            format!("{candidate_name} {phase}")
        } else {
            candidate_name.to_string()
        }
    }

    /// Rank the hypothesis' stored artifacts for a new `phase` artifact.
    ///
    /// Returns `None` when the hypothesis has no usable records.
    pub fn find_relevant(
        &self,
        store: &dyn IContextStore,
        hypothesis_id: &str,
        phase: Phase,
        candidate_name: &str,
    ) -> CoherenceResult<Option<RankedContext>> {
        let records = store.list_by_hypothesis(hypothesis_id)?;
        let result = self.rank(&records, phase, candidate_name);
        debug!(
            hypothesis_id,
            phase = %phase,
            records = records.len(),
            same_phase = result.as_ref().map_or(0, |r| r.same_phase.len()),
            other_phase = result.as_ref().map_or(0, |r| r.other_phase.len()),
            "find_relevant"
        );
        Ok(result)
    }

    /// Rank an already-listed record set. Pure.
    pub fn rank(
        &self,
        records: &[ContextRecord],
        phase: Phase,
        candidate_name: &str,
    ) -> Option<RankedContext> {
        let stats = CorpusStats::compute(records, self.vectorizer.dimensions());
        let usable: Vec<&ContextRecord> = records.iter().filter(|r| stats.accepts(r)).collect();
        if usable.is_empty() {
            return None;
        }

        let query = stats.weigh(&self.vectorizer.embed(&self.query_text(phase, candidate_name)));
        let weighed = stats.weigh_all(&usable);

        let mut scored: Vec<(f64, &ContextRecord)> = usable
            .iter()
            .zip(&weighed)
            .map(|(record, vector)| (cosine_similarity(&query, vector), *record))
            .collect();
        scored.sort_by(|a, b| compare_scored(a, b));

        let floor = self.config.min_similarity;
        let mut same: Vec<&(f64, &ContextRecord)> = Vec::new();
        let mut other: Vec<&(f64, &ContextRecord)> = Vec::new();
        for entry in scored.iter().filter(|(sim, _)| *sim > floor) {
            let bucket = if entry.1.phase == phase { &mut same } else { &mut other };
            if bucket.len() < self.config.top_k {
                bucket.push(entry);
            }
        }

        let same_phase: Vec<RankedRecord> = same.iter().map(|(s, r)| self.to_ranked(r, *s)).collect();
        let other_phase: Vec<RankedRecord> = other.iter().map(|(s, r)| self.to_ranked(r, *s)).collect();

        let retrieved: Vec<&ContextRecord> = same.iter().chain(&other).map(|(_, r)| *r).collect();
        let phase_count = usable.iter().filter(|r| r.phase == phase).count();
        let guidelines = guidelines::build(
            phase,
            phase_count,
            &retrieved,
            &same_phase,
            self.config.terminology_size,
            self.config.constraint_threshold,
        );

        Some(RankedContext {
            phase,
            same_phase,
            other_phase,
            guidelines,
        })
    }

    fn to_ranked(&self, record: &ContextRecord, similarity: f64) -> RankedRecord {
        RankedRecord {
            artifact_id: record.artifact_id.clone(),
            name: record.name.clone(),
            phase: record.phase,
            similarity,
            updated_at: record.updated_at,
            excerpt: record.content.chars().take(self.config.excerpt_chars).collect(),
        }
    }
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::from_config(&CoherenceConfig::default())
    }
}

/// Similarity descending, then newer first, then artifact id ascending.
fn compare_scored(a: &(f64, &ContextRecord), b: &(f64, &ContextRecord)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| b.1.updated_at.cmp(&a.1.updated_at))
        .then_with(|| a.1.artifact_id.cmp(&b.1.artifact_id))
}
