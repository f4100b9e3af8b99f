//! Connection pool managing one write connection and a set of readers.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use coherence_core::errors::CoherenceResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The single writer and the round-robin read pool, shared via `Arc`.
pub struct ConnectionPool {
    pub writer: Arc<WriteConnection>,
    pub readers: Option<Arc<ReadPool>>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer for a database file. Readers are attached with
    /// [`ConnectionPool::attach_readers`] once the schema exists.
    pub fn open_writer(path: &Path, busy_timeout_ms: u32) -> CoherenceResult<Self> {
        let writer = Arc::new(WriteConnection::open(path, busy_timeout_ms)?);
        Ok(Self {
            writer,
            readers: None,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database. All reads go through the writer because
    /// separate in-memory connections would be separate databases.
    pub fn open_in_memory() -> CoherenceResult<Self> {
        let writer = Arc::new(WriteConnection::open_in_memory()?);
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }

    /// Open `size` read-only connections to the same file as the writer.
    pub fn attach_readers(&mut self, size: usize, busy_timeout_ms: u32) -> CoherenceResult<()> {
        if let Some(path) = &self.db_path {
            self.readers = Some(Arc::new(ReadPool::open(path, size, busy_timeout_ms)?));
        }
        Ok(())
    }
}
