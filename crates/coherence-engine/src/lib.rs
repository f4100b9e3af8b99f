//! # coherence-engine
//!
//! Entry point for the host service. [`CoherenceEngine`] keeps the context
//! store in step with artifact lifecycle events and answers two read
//! questions: which prior artifacts matter for a new one, and how coherent
//! the hypothesis is overall.

pub mod engine;
pub mod stats;
pub mod tracing_setup;

pub use engine::CoherenceEngine;
pub use stats::CoherenceStats;
