/// Context store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("lock poisoned: {reason}")]
    LockPoisoned { reason: String },

    #[error("unknown storage backend: {backend}")]
    UnknownBackend { backend: String },
}
