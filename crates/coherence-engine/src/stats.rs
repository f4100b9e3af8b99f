//! CoherenceStats: per-phase and per-transition mean cosine similarity.

use std::collections::BTreeMap;

use tracing::debug;

use coherence_core::config::{CoherenceConfig, CoherenceThresholds};
use coherence_core::errors::CoherenceResult;
use coherence_core::models::{
    transition_key, CoherenceSnapshot, ContextRecord, GlobalCoherence, Phase,
    RECOMMENDATION_MODERATE, RECOMMENDATION_NOT_ENOUGH_DATA, RECOMMENDATION_STRONG,
    RECOMMENDATION_WEAK, PHASE_ORDER,
};
use coherence_core::traits::IContextStore;
use coherence_embeddings::cosine_similarity;
use coherence_retrieval::CorpusStats;

pub struct CoherenceStats {
    dimensions: usize,
    thresholds: CoherenceThresholds,
}

impl CoherenceStats {
    pub fn new(dimensions: usize, thresholds: CoherenceThresholds) -> Self {
        Self {
            dimensions,
            thresholds,
        }
    }

    pub fn from_config(config: &CoherenceConfig) -> Self {
        Self::new(config.embedding.dimensions, config.coherence.clone())
    }

    pub fn thresholds(&self) -> &CoherenceThresholds {
        &self.thresholds
    }

    /// Current snapshot of a hypothesis, computed from a fresh listing.
    pub fn snapshot(
        &self,
        store: &dyn IContextStore,
        hypothesis_id: &str,
    ) -> CoherenceResult<CoherenceSnapshot> {
        let records = store.list_by_hypothesis(hypothesis_id)?;
        let snapshot = self.compute(&records);
        debug!(
            hypothesis_id,
            total_contexts = snapshot.total_contexts,
            score = snapshot.global_coherence.score,
            "snapshot"
        );
        Ok(snapshot)
    }

    /// Snapshot of an already-listed record set. Pure.
    pub fn compute(&self, records: &[ContextRecord]) -> CoherenceSnapshot {
        let stats = CorpusStats::compute(records, self.dimensions);
        let usable: Vec<&ContextRecord> = records.iter().filter(|r| stats.accepts(r)).collect();
        if usable.is_empty() {
            return CoherenceSnapshot::empty();
        }

        let weighed = stats.weigh_all(&usable);
        let mut by_phase: BTreeMap<Phase, Vec<&[f32]>> = BTreeMap::new();
        for (record, vector) in usable.iter().zip(&weighed) {
            by_phase.entry(record.phase).or_default().push(vector.as_slice());
        }

        let phase_distribution: BTreeMap<Phase, usize> = PHASE_ORDER
            .iter()
            .map(|p| (*p, by_phase.get(p).map_or(0, Vec::len)))
            .collect();

        let phase_coherence: BTreeMap<Phase, Option<f64>> = by_phase
            .iter()
            .map(|(phase, vectors)| (*phase, mean_pairwise(vectors)))
            .collect();

        let mut transitions = BTreeMap::new();
        for (from, to) in Phase::transitions() {
            if let (Some(a), Some(b)) = (by_phase.get(&from), by_phase.get(&to)) {
                transitions.insert(transition_key(from, to), mean_cross(a, b));
            }
        }

        let defined: Vec<f64> = phase_coherence
            .values()
            .flatten()
            .chain(transitions.values())
            .copied()
            .collect();
        let score = if defined.is_empty() {
            0.0
        } else {
            defined.iter().sum::<f64>() / defined.len() as f64
        };
        let recommendation = recommend(
            (!defined.is_empty()).then_some(score),
            &self.thresholds,
        );

        CoherenceSnapshot {
            total_contexts: usable.len(),
            phase_distribution,
            completed_phases: by_phase.len(),
            total_phases: Phase::COUNT,
            phase_coherence,
            global_coherence: GlobalCoherence {
                score,
                transitions,
                recommendation: recommendation.to_string(),
            },
        }
    }
}

impl Default for CoherenceStats {
    fn default() -> Self {
        Self::from_config(&CoherenceConfig::default())
    }
}

/// Mean cosine over unordered pairs. `None` below two vectors.
fn mean_pairwise(vectors: &[&[f32]]) -> Option<f64> {
    if vectors.len() < 2 {
        return None;
    }
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for (i, a) in vectors.iter().enumerate() {
        for b in &vectors[i + 1..] {
            sum += cosine_similarity(a, b);
            pairs += 1;
        }
    }
    Some(sum / pairs as f64)
}

/// Mean cosine over the cross product. Both sides are non-empty.
fn mean_cross(left: &[&[f32]], right: &[&[f32]]) -> f64 {
    let mut sum = 0.0;
    for a in left {
        for b in right {
            sum += cosine_similarity(a, b);
        }
    }
    sum / (left.len() * right.len()) as f64
}

/// Recommendation text for a global score; `None` means nothing was defined.
pub fn recommend(score: Option<f64>, thresholds: &CoherenceThresholds) -> &'static str {
    match score {
        None => RECOMMENDATION_NOT_ENOUGH_DATA,
        Some(s) if s < thresholds.weak_below => RECOMMENDATION_WEAK,
        Some(s) if s < thresholds.strong_from => RECOMMENDATION_MODERATE,
        Some(_) => RECOMMENDATION_STRONG,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use coherence_core::models::RecordMetadata;

    use super::*;

    fn record(id: &str, phase: Phase, vector: Vec<f32>) -> ContextRecord {
        let now = Utc::now();
        ContextRecord {
            hypothesis_id: "h".to_string(),
            artifact_id: id.to_string(),
            phase,
            name: id.to_string(),
            content: String::new(),
            vector,
            metadata: RecordMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn stats() -> CoherenceStats {
        CoherenceStats::new(3, CoherenceThresholds::default())
    }

    #[test]
    fn recommendation_bands() {
        let t = CoherenceThresholds::default();
        assert_eq!(recommend(None, &t), RECOMMENDATION_NOT_ENOUGH_DATA);
        assert_eq!(recommend(Some(0.0), &t), RECOMMENDATION_WEAK);
        assert_eq!(recommend(Some(0.39), &t), RECOMMENDATION_WEAK);
        assert_eq!(recommend(Some(0.4), &t), RECOMMENDATION_MODERATE);
        assert_eq!(recommend(Some(0.69), &t), RECOMMENDATION_MODERATE);
        assert_eq!(recommend(Some(0.7), &t), RECOMMENDATION_STRONG);
    }

    #[test]
    fn empty_input_is_empty_snapshot() {
        assert_eq!(stats().compute(&[]), CoherenceSnapshot::empty());
    }

    #[test]
    fn single_record_has_no_defined_values() {
        let snap = stats().compute(&[record("a", Phase::Medir, vec![1.0, 0.0, 0.0])]);
        assert_eq!(snap.total_contexts, 1);
        assert_eq!(snap.completed_phases, 1);
        assert_eq!(snap.phase_coherence.get(&Phase::Medir), Some(&None));
        assert!(snap.global_coherence.transitions.is_empty());
        assert_eq!(snap.global_coherence.score, 0.0);
        assert_eq!(snap.global_coherence.recommendation, RECOMMENDATION_NOT_ENOUGH_DATA);
    }

    #[test]
    fn identical_phase_members_score_one() {
        let snap = stats().compute(&[
            record("a", Phase::Construir, vec![1.0, 1.0, 0.0]),
            record("b", Phase::Construir, vec![2.0, 2.0, 0.0]),
        ]);
        let score = snap.phase_coherence[&Phase::Construir].unwrap();
        assert!((score - 1.0).abs() < 1e-6);
        assert_eq!(snap.global_coherence.recommendation, RECOMMENDATION_STRONG);
    }

    #[test]
    fn disjoint_adjacent_phases_have_zero_transition() {
        let snap = stats().compute(&[
            record("a", Phase::Construir, vec![1.0, 0.0, 0.0]),
            record("b", Phase::Medir, vec![0.0, 1.0, 0.0]),
        ]);
        assert_eq!(snap.transition(Phase::Construir, Phase::Medir), Some(0.0));
        assert_eq!(snap.global_coherence.score, 0.0);
        assert_eq!(snap.global_coherence.recommendation, RECOMMENDATION_WEAK);
    }

    #[test]
    fn distribution_lists_every_phase() {
        let snap = stats().compute(&[
            record("a", Phase::Iterar, vec![1.0, 0.0, 0.0]),
            record("b", Phase::Iterar, vec![1.0, 0.0, 1.0]),
        ]);
        assert_eq!(snap.phase_distribution.len(), 5);
        assert_eq!(snap.phase_distribution[&Phase::Iterar], 2);
        assert_eq!(snap.phase_distribution[&Phase::Construir], 0);
        assert_eq!(snap.phase_coherence.len(), 1);
    }

    #[test]
    fn mismatched_records_are_ignored() {
        let snap = stats().compute(&[
            record("a", Phase::Medir, vec![1.0, 0.0, 0.0]),
            record("b", Phase::Medir, vec![1.0, 0.0]),
        ]);
        assert_eq!(snap.total_contexts, 1);
    }
}
