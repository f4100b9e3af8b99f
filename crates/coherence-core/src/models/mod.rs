//! Data model: phases, stored records, ranking results, and coherence snapshots.

mod context_record;
mod phase;
mod ranked_context;
mod snapshot;

pub use context_record::{BucketTerm, ContextRecord, RecordMetadata};
pub use phase::{transition_key, Phase, PHASE_ORDER};
pub use ranked_context::{Guidelines, RankedContext, RankedRecord};
pub use snapshot::{
    ActionItem, ActionTarget, CoherenceSnapshot, GlobalCoherence, RECOMMENDATION_MODERATE,
    RECOMMENDATION_NOT_ENOUGH_DATA, RECOMMENDATION_STRONG, RECOMMENDATION_WEAK,
};
