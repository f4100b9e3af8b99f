// Single source of truth for all default values.

// --- Embedding ---
pub const DEFAULT_DIMENSIONS: usize = 256;
pub const DEFAULT_MIN_TOKEN_CHARS: usize = 3;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.05;
pub const DEFAULT_TERMINOLOGY_SIZE: usize = 8;
pub const DEFAULT_CONSTRAINT_THRESHOLD: f64 = 0.6;
pub const DEFAULT_QUERY_INCLUDES_PHASE: bool = true;
pub const DEFAULT_EXCERPT_CHARS: usize = 400;

// --- Coherence ---
pub const DEFAULT_WEAK_BELOW: f64 = 0.4;
pub const DEFAULT_STRONG_FROM: f64 = 0.7;
pub const DEFAULT_PHASE_ACTION_BELOW: f64 = 0.5;
pub const DEFAULT_TRANSITION_ACTION_BELOW: f64 = 0.4;

// --- Storage ---
pub const DEFAULT_STORAGE_BACKEND: &str = "memory";
pub const DEFAULT_DB_FILENAME: &str = "coherence.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
