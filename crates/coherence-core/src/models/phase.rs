use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoherenceError;

/// One of the five sequential stages of the artifact pipeline.
///
/// Declaration order is the pipeline order, so the derived `Ord` sorts
/// phases the same way [`PHASE_ORDER`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Construir,
    Medir,
    Aprender,
    Pivotar,
    Iterar,
}

/// The canonical pipeline order. Transitions are scored only between
/// neighbours in this sequence.
pub const PHASE_ORDER: [Phase; 5] = [
    Phase::Construir,
    Phase::Medir,
    Phase::Aprender,
    Phase::Pivotar,
    Phase::Iterar,
];

impl Phase {
    pub const COUNT: usize = PHASE_ORDER.len();

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Construir => "construir",
            Phase::Medir => "medir",
            Phase::Aprender => "aprender",
            Phase::Pivotar => "pivotar",
            Phase::Iterar => "iterar",
        }
    }

    /// Zero-based position in [`PHASE_ORDER`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<Phase> {
        PHASE_ORDER.get(self.index() + 1).copied()
    }

    /// Consecutive `(from, to)` pairs of the pipeline.
    pub fn transitions() -> impl Iterator<Item = (Phase, Phase)> {
        PHASE_ORDER.windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CoherenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        PHASE_ORDER
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| CoherenceError::InvalidPhase {
                value: s.to_string(),
            })
    }
}

/// Key used in transition maps, e.g. `construir→medir`.
pub fn transition_key(from: Phase, to: Phase) -> String {
    format!("{from}→{to}")
}
