//! In-memory store: `DashMap<hypothesis_id, BTreeMap<artifact_id, record>>`.
//!
//! A hypothesis lives in exactly one shard, so each listing clones its
//! records under that shard's lock and sees a consistent set.

use std::collections::BTreeMap;

use dashmap::DashMap;
use tracing::debug;

use coherence_core::errors::CoherenceResult;
use coherence_core::models::{ContextRecord, Phase};
use coherence_core::traits::IContextStore;

use crate::sort_records;

#[derive(Debug, Default)]
pub struct MemoryContextStore {
    records: DashMap<String, BTreeMap<String, ContextRecord>>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hypotheses with at least one record.
    pub fn hypothesis_count(&self) -> usize {
        self.records.len()
    }
}

impl IContextStore for MemoryContextStore {
    fn upsert(&self, record: &ContextRecord) -> CoherenceResult<()> {
        let mut entry = self.records.entry(record.hypothesis_id.clone()).or_default();
        let mut stored = record.clone();
        if let Some(existing) = entry.get(&record.artifact_id) {
            stored.created_at = existing.created_at;
        }
        entry.insert(record.artifact_id.clone(), stored);
        debug!(
            hypothesis_id = %record.hypothesis_id,
            artifact_id = %record.artifact_id,
            phase = %record.phase,
            "context record upserted"
        );
        Ok(())
    }

    fn get(&self, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<Option<ContextRecord>> {
        Ok(self
            .records
            .get(hypothesis_id)
            .and_then(|m| m.get(artifact_id).cloned()))
    }

    fn delete(&self, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<bool> {
        let removed = match self.records.get_mut(hypothesis_id) {
            Some(mut m) => m.remove(artifact_id).is_some(),
            None => false,
        };
        // The guard above is dropped before touching the map again.
        self.records.remove_if(hypothesis_id, |_, m| m.is_empty());
        debug!(hypothesis_id, artifact_id, removed, "context record delete");
        Ok(removed)
    }

    fn list_by_hypothesis(&self, hypothesis_id: &str) -> CoherenceResult<Vec<ContextRecord>> {
        let mut records: Vec<ContextRecord> = self
            .records
            .get(hypothesis_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        sort_records(&mut records);
        Ok(records)
    }

    fn list_by_hypothesis_and_phase(
        &self,
        hypothesis_id: &str,
        phase: Phase,
    ) -> CoherenceResult<Vec<ContextRecord>> {
        let mut records: Vec<ContextRecord> = self
            .records
            .get(hypothesis_id)
            .map(|m| m.values().filter(|r| r.phase == phase).cloned().collect())
            .unwrap_or_default();
        sort_records(&mut records);
        Ok(records)
    }

    fn count(&self, hypothesis_id: &str) -> CoherenceResult<usize> {
        Ok(self.records.get(hypothesis_id).map(|m| m.len()).unwrap_or(0))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
