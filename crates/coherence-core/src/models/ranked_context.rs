use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Phase;

/// A prior artifact selected for a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecord {
    pub artifact_id: String,
    pub name: String,
    pub phase: Phase,
    /// Cosine similarity to the query in [0, 1].
    pub similarity: f64,
    pub updated_at: DateTime<Utc>,
    /// Leading slice of the stored content.
    pub excerpt: String,
}

/// Consistency hints derived from the retrieved set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidelines {
    /// Dominant words across the retrieved artifacts, strongest first.
    pub terminology: Vec<String>,
    pub phase_context: String,
    /// One line per closely matching artifact in the target phase.
    pub constraints: Vec<String>,
}

/// Result of a relevance query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedContext {
    pub phase: Phase,
    pub same_phase: Vec<RankedRecord>,
    pub other_phase: Vec<RankedRecord>,
    pub guidelines: Guidelines,
}

impl RankedContext {
    pub fn is_empty(&self) -> bool {
        self.same_phase.is_empty() && self.other_phase.is_empty()
    }

    /// All retrieved entries, same phase first.
    pub fn iter(&self) -> impl Iterator<Item = &RankedRecord> {
        self.same_phase.iter().chain(self.other_phase.iter())
    }

    /// Plain-text rendering for a prompt builder.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.guidelines.phase_context);

        if !self.same_phase.is_empty() {
            let _ = writeln!(out, "\nRelated artifacts in {}:", self.phase);
            for r in &self.same_phase {
                render_entry(&mut out, r);
            }
        }
        if !self.other_phase.is_empty() {
            let _ = writeln!(out, "\nRelated artifacts in other phases:");
            for r in &self.other_phase {
                render_entry(&mut out, r);
            }
        }
        if !self.guidelines.terminology.is_empty() {
            let _ = writeln!(
                out,
                "\nKey terminology: {}",
                self.guidelines.terminology.join(", ")
            );
        }
        for c in &self.guidelines.constraints {
            let _ = writeln!(out, "- {c}");
        }
        out
    }
}

fn render_entry(out: &mut String, r: &RankedRecord) {
    let _ = writeln!(
        out,
        "- [{}] {} (similarity {:.2}): {}",
        r.phase, r.name, r.similarity, r.excerpt
    );
}
