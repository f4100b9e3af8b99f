use super::{ConfigError, StorageError};

/// Top-level error for every fallible engine operation.
///
/// "No records for a hypothesis" is deliberately absent: callers get `None`
/// or an empty snapshot instead.
#[derive(Debug, thiserror::Error)]
pub enum CoherenceError {
    #[error("invalid phase: {value}")]
    InvalidPhase { value: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for CoherenceError {
    fn from(err: serde_json::Error) -> Self {
        CoherenceError::Serialization {
            reason: err.to_string(),
        }
    }
}

pub type CoherenceResult<T> = Result<T, CoherenceError>;
