pub mod config;
pub mod models;
pub mod scoring; // Surgical risk, bridging, limb ischemia

use tracing_subscriber::EnvFilter;

pub use scoring::{DefaultRiskEngine, RiskEngine, ScoringError, ScoringReference};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config::default_log_filter()`.
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Build an engine with band tables from the data directory, falling back to
/// the built-in tables.
pub fn default_engine() -> DefaultRiskEngine {
    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);
    DefaultRiskEngine::new(ScoringReference::load_or_builtin(&config::app_data_dir()))
}
