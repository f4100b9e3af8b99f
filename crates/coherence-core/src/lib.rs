//! # coherence-core
//!
//! Foundation crate for the coherence engine.
//! Defines the phase model, context records, snapshots, the store trait,
//! errors, and configuration. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CoherenceConfig;
pub use errors::{CoherenceError, CoherenceResult};
pub use models::{
    ActionItem, CoherenceSnapshot, ContextRecord, Guidelines, Phase, RankedContext, RankedRecord,
    RecordMetadata, PHASE_ORDER,
};
pub use traits::IContextStore;
