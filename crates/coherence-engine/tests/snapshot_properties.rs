//! Property tests: snapshot values stay in range and counts add up.

use proptest::prelude::*;
use std::sync::Arc;

use coherence_core::config::CoherenceConfig;
use coherence_core::models::PHASE_ORDER;
use coherence_engine::CoherenceEngine;
use coherence_storage::MemoryContextStore;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_snapshot_is_consistent(
        artifacts in prop::collection::vec(("[a-z]{3,8}( [a-z]{3,8}){0,8}", 0usize..5), 0..12)
    ) {
        let engine =
            CoherenceEngine::new(Arc::new(MemoryContextStore::new()), &CoherenceConfig::default())
                .unwrap();
        for (i, (text, p)) in artifacts.iter().enumerate() {
            engine.store(&format!("a{i}"), "prop", PHASE_ORDER[*p], "", text).unwrap();
        }

        let snap = engine.snapshot("prop").unwrap();
        prop_assert_eq!(snap.total_contexts, artifacts.len());
        prop_assert_eq!(snap.phase_distribution.values().sum::<usize>(), artifacts.len());
        prop_assert_eq!(snap.completed_phases, snap.phase_coherence.len());
        prop_assert!(snap.global_coherence.transitions.len() <= 4);

        let score = snap.global_coherence.score;
        prop_assert!((0.0..=1.0 + 1e-9).contains(&score));
        for v in snap.phase_coherence.values().flatten() {
            prop_assert!((0.0..=1.0 + 1e-9).contains(v));
        }
    }
}
