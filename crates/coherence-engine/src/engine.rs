//! CoherenceEngine: the facade the host calls on artifact lifecycle events
//! and before generating a new artifact.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, warn};

use coherence_core::config::CoherenceConfig;
use coherence_core::errors::CoherenceResult;
use coherence_core::models::{ActionItem, CoherenceSnapshot, ContextRecord, Phase, RankedContext};
use coherence_core::traits::IContextStore;
use coherence_embeddings::vectorizer::content_hash;
use coherence_embeddings::HashingVectorizer;
use coherence_retrieval::RelevanceRanker;
use coherence_storage::open_store;

use crate::stats::CoherenceStats;

pub struct CoherenceEngine {
    store: Arc<dyn IContextStore>,
    vectorizer: HashingVectorizer,
    ranker: RelevanceRanker,
    stats: CoherenceStats,
}

impl CoherenceEngine {
    /// Wire an engine around an existing store. The config is validated
    /// first, so invalid dimensions surface as `ConfigError::Invalid`.
    pub fn new(store: Arc<dyn IContextStore>, config: &CoherenceConfig) -> CoherenceResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            vectorizer: HashingVectorizer::from_config(&config.embedding),
            ranker: RelevanceRanker::from_config(config),
            stats: CoherenceStats::from_config(config),
        })
    }

    /// Open the configured store and wire the engine around it.
    pub fn from_config(config: &CoherenceConfig) -> CoherenceResult<Self> {
        config.validate()?;
        let store = open_store(&config.storage)?;
        info!(
            backend = store.name(),
            dimensions = config.embedding.dimensions,
            "coherence engine ready"
        );
        Self::new(store, config)
    }

    pub fn store_handle(&self) -> &Arc<dyn IContextStore> {
        &self.store
    }

    /// Embed and upsert an artifact. Called after the artifact is created.
    pub fn store(
        &self,
        artifact_id: &str,
        hypothesis_id: &str,
        phase: Phase,
        name: &str,
        content: &str,
    ) -> CoherenceResult<()> {
        let record = self.build_record(artifact_id, hypothesis_id, phase, name, content, now());
        self.store.upsert(&record)?;
        debug!(
            hypothesis_id,
            artifact_id,
            phase = %phase,
            tokens = record.metadata.token_count,
            "stored context"
        );
        Ok(())
    }

    /// Same contract as [`CoherenceEngine::store`]. The write is skipped when
    /// phase, name, and embedded text are unchanged.
    pub fn update(
        &self,
        artifact_id: &str,
        hypothesis_id: &str,
        phase: Phase,
        name: &str,
        content: &str,
    ) -> CoherenceResult<()> {
        if let Some(existing) = self.store.get(hypothesis_id, artifact_id)? {
            let hash = content_hash(&ContextRecord::embedding_text(name, content));
            if existing.matches_content(phase, name, &hash)
                && existing.vector.len() == self.vectorizer.dimensions()
            {
                debug!(hypothesis_id, artifact_id, "content unchanged, skipping update");
                return Ok(());
            }
        }
        self.store(artifact_id, hypothesis_id, phase, name, content)
    }

    /// Remove an artifact's context. Absent keys are not an error.
    pub fn delete(&self, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<()> {
        let removed = self.store.delete(hypothesis_id, artifact_id)?;
        debug!(hypothesis_id, artifact_id, removed, "deleted context");
        Ok(())
    }

    pub fn find_relevant(
        &self,
        hypothesis_id: &str,
        phase: Phase,
        candidate_name: &str,
    ) -> CoherenceResult<Option<RankedContext>> {
        self.ranker
            .find_relevant(self.store.as_ref(), hypothesis_id, phase, candidate_name)
    }

    pub fn snapshot(&self, hypothesis_id: &str) -> CoherenceResult<CoherenceSnapshot> {
        self.stats.snapshot(self.store.as_ref(), hypothesis_id)
    }

    /// Phases and transitions of the current snapshot that need attention.
    pub fn action_items(&self, hypothesis_id: &str) -> CoherenceResult<Vec<ActionItem>> {
        Ok(self
            .snapshot(hypothesis_id)?
            .action_items(self.stats.thresholds()))
    }

    /// [`CoherenceEngine::find_relevant`] for callers that generate without
    /// context on failure.
    pub fn find_relevant_or_skip(
        &self,
        hypothesis_id: &str,
        phase: Phase,
        candidate_name: &str,
    ) -> Option<RankedContext> {
        match self.find_relevant(hypothesis_id, phase, candidate_name) {
            Ok(result) => result,
            Err(e) => {
                warn!(hypothesis_id, phase = %phase, error = %e, "relevance ranking failed, continuing without context");
                None
            }
        }
    }

    /// [`CoherenceEngine::snapshot`], falling back to the empty snapshot.
    pub fn snapshot_or_empty(&self, hypothesis_id: &str) -> CoherenceSnapshot {
        self.snapshot(hypothesis_id).unwrap_or_else(|e| {
            warn!(hypothesis_id, error = %e, "coherence snapshot failed, reporting empty");
            CoherenceSnapshot::empty()
        })
    }

    fn build_record(
        &self,
        artifact_id: &str,
        hypothesis_id: &str,
        phase: Phase,
        name: &str,
        content: &str,
        at: DateTime<Utc>,
    ) -> ContextRecord {
        let embedding = self
            .vectorizer
            .embed_with_terms(&ContextRecord::embedding_text(name, content));
        ContextRecord {
            hypothesis_id: hypothesis_id.to_string(),
            artifact_id: artifact_id.to_string(),
            phase,
            name: name.to_string(),
            content: content.to_string(),
            vector: embedding.vector,
            metadata: embedding.metadata,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Microsecond precision, which every backend round-trips exactly.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
