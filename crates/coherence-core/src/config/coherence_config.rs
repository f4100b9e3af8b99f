use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds for the coherence recommendation and action items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceThresholds {
    /// Global scores below this are "weak".
    pub weak_below: f64,
    /// Global scores at or above this are "strong".
    pub strong_from: f64,
    /// Phase scores below this produce an action item.
    pub phase_action_below: f64,
    /// Transition scores below this produce an action item.
    pub transition_action_below: f64,
}

impl Default for CoherenceThresholds {
    fn default() -> Self {
        Self {
            weak_below: defaults::DEFAULT_WEAK_BELOW,
            strong_from: defaults::DEFAULT_STRONG_FROM,
            phase_action_below: defaults::DEFAULT_PHASE_ACTION_BELOW,
            transition_action_below: defaults::DEFAULT_TRANSITION_ACTION_BELOW,
        }
    }
}
