//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! fibtrace.toml (optional, working directory)
//!     → loader.rs (parse & deserialize, or defaults when absent)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → consumed once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so the service runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError, DEFAULT_CONFIG_PATH};
pub use schema::{
    BatchSettings, LimitsConfig, ListenerConfig, ObservabilityConfig, ResourceConfig, ServiceConfig,
    TraceConfig,
};
pub use validation::{validate_config, ValidationError};
