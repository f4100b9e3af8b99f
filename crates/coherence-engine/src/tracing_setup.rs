//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coherence_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Filter variable, e.g. `COHERENCE_LOG=coherence_storage=debug,coherence_retrieval=info`.
pub const LOG_ENV: &str = "COHERENCE_LOG";

/// Initialize logging with default settings.
///
/// Falls back to `coherence=info` if `COHERENCE_LOG` is unset or invalid.
/// Only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with(&ObservabilityConfig::default());
}

/// Initialize logging from the `[observability]` config section.
pub fn init_tracing_with(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.json_logs {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
        // Another subscriber was installed by the host; keep it.
        let _ = result;
    });
}

/// `coherence=<level>`: every workspace crate's target starts with `coherence`.
fn default_directive(level: &str) -> String {
    format!("coherence={level}")
}
