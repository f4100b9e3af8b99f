//! # coherence-storage
//!
//! Persistence for context records behind [`IContextStore`].
//!
//! - [`MemoryContextStore`]: sharded concurrent map, one entry per hypothesis.
//! - [`SqliteContextStore`]: single writer + read pool, versioned migrations.

pub mod engine;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;

use std::path::Path;
use std::sync::Arc;

use coherence_core::config::StorageConfig;
use coherence_core::errors::{CoherenceError, CoherenceResult, StorageError};
use coherence_core::models::ContextRecord;
use coherence_core::traits::IContextStore;
use tracing::info;

pub use engine::SqliteContextStore;
pub use memory::MemoryContextStore;

/// Wrap a backend error message as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> CoherenceError {
    CoherenceError::Storage(StorageError::Sqlite {
        message: message.into(),
    })
}

/// Canonical listing order: most recently updated first, then artifact id.
pub fn sort_records(records: &mut [ContextRecord]) {
    records.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.artifact_id.cmp(&b.artifact_id))
    });
}

/// Open the store selected by `config.backend`.
pub fn open_store(config: &StorageConfig) -> CoherenceResult<Arc<dyn IContextStore>> {
    let store: Arc<dyn IContextStore> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryContextStore::new()),
        "sqlite" if config.db_path == ":memory:" => Arc::new(SqliteContextStore::open_in_memory()?),
        "sqlite" => Arc::new(SqliteContextStore::open_with(
            Path::new(&config.db_path),
            config.read_pool_size,
            config.busy_timeout_ms,
        )?),
        other => {
            return Err(StorageError::UnknownBackend {
                backend: other.to_string(),
            }
            .into())
        }
    };
    info!(backend = store.name(), "context store opened");
    Ok(store)
}
