//! Structured logging.
//!
//! # Responsibilities
//! - Build the process subscriber: console logs plus the span export layer
//! - Pick the log level from `RUST_LOG`, falling back to config
//!
//! # Design Decisions
//! - The level filter applies to the console layer only, so span export sees
//!   every span of its scope regardless of verbosity
//! - The export layer is optional: startup failures are logged before the
//!   pipeline exists

use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::ObservabilityConfig;
use crate::observability::provider::ExportLayer;

/// Console filter: `RUST_LOG` if set and valid, otherwise the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build the process subscriber.
pub fn subscriber(config: &ObservabilityConfig, export: Option<ExportLayer>) -> Dispatch {
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(env_filter(config));

    Dispatch::new(Registry::default().with(export).with(console))
}

/// Install `dispatch` as the process-wide default.
///
/// Returns `false` if a default was already installed.
pub fn install(dispatch: &Dispatch) -> bool {
    tracing::dispatcher::set_global_default(dispatch.clone()).is_ok()
}
