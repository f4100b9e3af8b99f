//! SqliteContextStore: owns the ConnectionPool, runs migrations at open,
//! implements IContextStore.

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use coherence_core::config::defaults::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_READ_POOL_SIZE};
use coherence_core::errors::CoherenceResult;
use coherence_core::models::{ContextRecord, Phase};
use coherence_core::traits::IContextStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::record_crud;

pub struct SqliteContextStore {
    pool: ConnectionPool,
}

impl SqliteContextStore {
    /// Open a store backed by a file on disk with default pool settings.
    pub fn open(path: &Path) -> CoherenceResult<Self> {
        Self::open_with(path, DEFAULT_READ_POOL_SIZE, DEFAULT_BUSY_TIMEOUT_MS)
    }

    pub fn open_with(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> CoherenceResult<Self> {
        let mut pool = ConnectionPool::open_writer(path, busy_timeout_ms)?;
        let version = pool.writer.with_conn(migrations::run_migrations)?;
        pool.attach_readers(read_pool_size, busy_timeout_ms)?;
        info!(
            path = %path.display(),
            schema_version = version,
            read_pool_size,
            "sqlite context store opened"
        );
        Ok(Self { pool })
    }

    /// In-memory database; reads are routed through the writer.
    pub fn open_in_memory() -> CoherenceResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        pool.writer.with_conn(migrations::run_migrations)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run a read on the pool when file-backed, on the writer otherwise.
    fn with_reader<F, T>(&self, f: F) -> CoherenceResult<T>
    where
        F: FnOnce(&Connection) -> CoherenceResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }
}

impl IContextStore for SqliteContextStore {
    fn upsert(&self, record: &ContextRecord) -> CoherenceResult<()> {
        self.pool
            .writer
            .with_conn(|conn| record_crud::upsert_record(conn, record))
    }

    fn get(&self, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<Option<ContextRecord>> {
        self.with_reader(|conn| record_crud::get_record(conn, hypothesis_id, artifact_id))
    }

    fn delete(&self, hypothesis_id: &str, artifact_id: &str) -> CoherenceResult<bool> {
        self.pool
            .writer
            .with_conn(|conn| record_crud::delete_record(conn, hypothesis_id, artifact_id))
    }

    fn list_by_hypothesis(&self, hypothesis_id: &str) -> CoherenceResult<Vec<ContextRecord>> {
        self.with_reader(|conn| record_crud::list_records(conn, hypothesis_id, None))
    }

    fn list_by_hypothesis_and_phase(
        &self,
        hypothesis_id: &str,
        phase: Phase,
    ) -> CoherenceResult<Vec<ContextRecord>> {
        self.with_reader(|conn| record_crud::list_records(conn, hypothesis_id, Some(phase)))
    }

    fn count(&self, hypothesis_id: &str) -> CoherenceResult<usize> {
        self.with_reader(|conn| record_crud::count_records(conn, hypothesis_id))
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
