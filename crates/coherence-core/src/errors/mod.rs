//! Error taxonomy for the coherence engine.

mod coherence_error;
mod config_error;
mod storage_error;

pub use coherence_error::{CoherenceError, CoherenceResult};
pub use config_error::ConfigError;
pub use storage_error::StorageError;
