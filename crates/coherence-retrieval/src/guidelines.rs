//! Consistency hints attached to a ranked context.

use std::collections::BTreeMap;

use coherence_core::models::{ContextRecord, Guidelines, Phase, RankedRecord};

/// Assemble the guidelines for a ranked result.
///
/// `retrieved` are the records behind `same_phase` and `other_phase`;
/// `phase_count` is how many records the hypothesis holds in `phase`.
pub fn build(
    phase: Phase,
    phase_count: usize,
    retrieved: &[&ContextRecord],
    same_phase: &[RankedRecord],
    terminology_size: usize,
    constraint_threshold: f64,
) -> Guidelines {
    Guidelines {
        terminology: terminology(retrieved, terminology_size),
        phase_context: phase_context(phase, phase_count),
        constraints: constraints(same_phase, constraint_threshold),
    }
}

/// Dominant words of the retrieved set.
///
/// Picks the `limit` dimensions with the largest summed raw TF (ties by
/// lower index) and names each by the source token with the largest summed
/// count in that bucket (ties by the lexicographically smaller token).
/// Buckets with no known token are skipped.
pub fn terminology(retrieved: &[&ContextRecord], limit: usize) -> Vec<String> {
    let dimensions = retrieved.iter().map(|r| r.vector.len()).max().unwrap_or(0);
    let mut totals = vec![0.0f64; dimensions];
    for record in retrieved {
        for (total, weight) in totals.iter_mut().zip(&record.vector) {
            *total += *weight as f64;
        }
    }

    let mut ranked: Vec<(usize, f64)> = totals
        .into_iter()
        .enumerate()
        .filter(|(_, total)| *total > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .filter_map(|(bucket, _)| dominant_term(retrieved, bucket))
        .take(limit)
        .collect()
}

fn dominant_term(retrieved: &[&ContextRecord], bucket: usize) -> Option<String> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in retrieved {
        if let Some(bt) = record.metadata.bucket_terms.get(&bucket) {
            *counts.entry(bt.term.as_str()).or_default() += bt.count as u64;
        }
    }
    // BTreeMap iterates in key order, so the first maximum is the smallest term.
    let mut best: Option<(&str, u64)> = None;
    for (term, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((term, count));
        }
    }
    best.map(|(term, _)| term.to_string())
}

/// The fixed sentence naming the target phase and its prior artifact count.
pub fn phase_context(phase: Phase, phase_count: usize) -> String {
    let noun = if phase_count == 1 { "artifact" } else { "artifacts" };
    format!(
        "This artifact belongs to the '{phase}' phase, which already has {phase_count} prior {noun} for this hypothesis."
    )
}

/// One instruction per same-phase entry scoring strictly above `threshold`.
pub fn constraints(same_phase: &[RankedRecord], threshold: f64) -> Vec<String> {
    same_phase
        .iter()
        .filter(|r| r.similarity > threshold)
        .map(|r| {
            format!(
                "Stay consistent with \"{}\" (similarity {:.2}): reuse its terms and do not contradict it.",
                r.name, r.similarity
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use coherence_core::models::{BucketTerm, RecordMetadata};

    use super::*;

    fn record(vector: Vec<f32>, terms: &[(usize, &str, u32)]) -> ContextRecord {
        let now = Utc::now();
        let bucket_terms: BTreeMap<usize, BucketTerm> = terms
            .iter()
            .map(|(b, t, c)| {
                (
                    *b,
                    BucketTerm {
                        term: t.to_string(),
                        count: *c,
                    },
                )
            })
            .collect();
        ContextRecord {
            hypothesis_id: "h".to_string(),
            artifact_id: "a".to_string(),
            phase: Phase::Medir,
            name: "n".to_string(),
            content: String::new(),
            vector,
            metadata: RecordMetadata {
                bucket_terms,
                ..Default::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn ranked(name: &str, similarity: f64) -> RankedRecord {
        RankedRecord {
            artifact_id: name.to_string(),
            name: name.to_string(),
            phase: Phase::Medir,
            similarity,
            updated_at: Utc::now(),
            excerpt: String::new(),
        }
    }

    #[test]
    fn terminology_orders_by_summed_tf() {
        let a = record(vec![1.0, 3.0, 0.0, 2.0], &[(0, "usuario", 1), (1, "churn", 3), (3, "precio", 2)]);
        let b = record(vec![0.0, 1.0, 0.0, 2.0], &[(1, "churn", 1), (3, "precio", 2)]);
        let terms = terminology(&[&a, &b], 8);
        assert_eq!(terms, vec!["churn", "precio", "usuario"]);
    }

    #[test]
    fn terminology_respects_limit_and_index_ties() {
        let a = record(vec![1.0, 1.0, 1.0], &[(0, "zeta", 1), (1, "alfa", 1), (2, "beta", 1)]);
        assert_eq!(terminology(&[&a], 2), vec!["zeta", "alfa"]);
    }

    #[test]
    fn colliding_tokens_resolve_to_larger_sum() {
        let a = record(vec![2.0], &[(0, "retencion", 2)]);
        let b = record(vec![3.0], &[(0, "cohorte", 3)]);
        let c = record(vec![2.0], &[(0, "retencion", 2)]);
        assert_eq!(terminology(&[&a, &b, &c], 8), vec!["retencion"]);

        let d = record(vec![3.0], &[(0, "abandono", 3)]);
        assert_eq!(terminology(&[&b, &d], 8), vec!["abandono"]);
    }

    #[test]
    fn terminology_of_nothing_is_empty() {
        assert!(terminology(&[], 8).is_empty());
    }

    #[test]
    fn phase_context_names_phase_and_count() {
        let text = phase_context(Phase::Aprender, 3);
        assert!(text.contains("'aprender'"));
        assert!(text.contains("3 prior artifacts"));
        assert!(phase_context(Phase::Medir, 1).contains("1 prior artifact "));
    }

    #[test]
    fn constraints_use_strict_threshold() {
        let same = vec![ranked("Encuesta", 0.9), ranked("Borde", 0.6), ranked("Lejano", 0.2)];
        let lines = constraints(&same, 0.6);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"Encuesta\""));
    }
}
