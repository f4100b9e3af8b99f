use crate::errors::CoherenceResult;
use crate::models::{ContextRecord, Phase};

/// Persistence for context records, scoped by hypothesis.
///
/// Implementations must give each listing a consistent view of one
/// hypothesis. Listings are ordered by `updated_at` descending, then
/// `artifact_id` ascending.
pub trait IContextStore: Send + Sync {
    /// Insert or replace the record keyed by `(hypothesis_id, artifact_id)`.
    /// An existing record keeps its `created_at`.
    fn upsert(&self, record: &ContextRecord) -> CoherenceResult<()>;

    fn get(&self, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<Option<ContextRecord>>;

    /// Remove a record. Returns whether anything was removed.
    fn delete(&self, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<bool>;

    fn list_by_hypothesis(&self, hypothesis_id: &str) -> CoherenceResult<Vec<ContextRecord>>;

    fn list_by_hypothesis_and_phase(
        &self,
        hypothesis_id: &str,
        phase: Phase,
    ) -> CoherenceResult<Vec<ContextRecord>>;

    fn count(&self, hypothesis_id: &str) -> CoherenceResult<usize>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
