use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::phase::transition_key;
use super::{Phase, PHASE_ORDER};
use crate::config::CoherenceThresholds;

pub const RECOMMENDATION_NOT_ENOUGH_DATA: &str = "not enough data";
pub const RECOMMENDATION_WEAK: &str = "coherence is weak, artifacts likely contradict each other";
pub const RECOMMENDATION_MODERATE: &str = "coherence is moderate, review flagged phases/transitions";
pub const RECOMMENDATION_STRONG: &str = "coherence is strong";

const PHASE_ADVICE: &str =
    "artifacts in this phase diverge; align their terminology and assumptions";
const TRANSITION_ADVICE: &str =
    "this phase transition loses continuity; reference the previous phase's findings explicitly";

/// Aggregate score across phases and transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCoherence {
    pub score: f64,
    /// `"from→to"` → mean cross-phase similarity.
    pub transitions: BTreeMap<String, f64>,
    pub recommendation: String,
}

/// Point-in-time coherence statistics for one hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherenceSnapshot {
    pub total_contexts: usize,
    pub phase_distribution: BTreeMap<Phase, usize>,
    pub completed_phases: usize,
    pub total_phases: usize,
    /// `None` marks a phase with a single record (insufficient data).
    pub phase_coherence: BTreeMap<Phase, Option<f64>>,
    pub global_coherence: GlobalCoherence,
}

impl CoherenceSnapshot {
    /// Snapshot for a hypothesis with no stored records.
    pub fn empty() -> Self {
        Self {
            total_contexts: 0,
            phase_distribution: BTreeMap::new(),
            completed_phases: 0,
            total_phases: Phase::COUNT,
            phase_coherence: BTreeMap::new(),
            global_coherence: GlobalCoherence {
                score: 0.0,
                transitions: BTreeMap::new(),
                recommendation: RECOMMENDATION_NOT_ENOUGH_DATA.to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_contexts == 0
    }

    /// Score of the `from→to` transition, if both phases had data.
    pub fn transition(&self, from: Phase, to: Phase) -> Option<f64> {
        self.global_coherence
            .transitions
            .get(&transition_key(from, to))
            .copied()
    }

    /// Phases and transitions scoring under the action thresholds.
    ///
    /// Phases come first in pipeline order, then transitions in pipeline order.
    pub fn action_items(&self, thresholds: &CoherenceThresholds) -> Vec<ActionItem> {
        let mut items = Vec::new();
        for phase in PHASE_ORDER {
            if let Some(Some(score)) = self.phase_coherence.get(&phase) {
                if *score < thresholds.phase_action_below {
                    items.push(ActionItem {
                        target: ActionTarget::Phase { phase },
                        score: *score,
                        advice: PHASE_ADVICE.to_string(),
                    });
                }
            }
        }
        for (from, to) in Phase::transitions() {
            if let Some(score) = self.transition(from, to) {
                if score < thresholds.transition_action_below {
                    items.push(ActionItem {
                        target: ActionTarget::Transition { from, to },
                        score,
                        advice: TRANSITION_ADVICE.to_string(),
                    });
                }
            }
        }
        items
    }
}

/// What an action item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionTarget {
    Phase { phase: Phase },
    Transition { from: Phase, to: Phase },
}

impl ActionTarget {
    /// `"medir"` or `"medir→aprender"`.
    pub fn identifier(&self) -> String {
        match self {
            ActionTarget::Phase { phase } => phase.to_string(),
            ActionTarget::Transition { from, to } => transition_key(*from, *to),
        }
    }
}

/// A "needs improvement" entry derived from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub target: ActionTarget,
    pub score: f64,
    pub advice: String,
}
