//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers open spans (target "fib")
//!     → provider.rs (tracing-opentelemetry layer, filtered to the scope)
//!     → opentelemetry_sdk BatchSpanProcessor (bounded queue, export thread)
//!     → exporter.rs (pretty JSON to traces.txt)
//!
//! everything else:
//!     → logging.rs (console fmt layer, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - No global tracer: handlers get a `Telemetry` context at construction
//! - Export never blocks a request; the SDK drops spans when its queue is full
//! - Resource attributes are fixed when the provider is built

pub mod context;
pub mod error_handler;
pub mod exporter;
pub mod logging;
pub mod provider;
pub mod resource;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{Scoped, Telemetry};
pub use error_handler::{CountErrors, ErrorHandler, IgnoreErrors, LogErrors};
pub use exporter::{ExportError, PrettyWriterExporter};
pub use provider::{
    batch_provider, export_layer, ExportLayer, STATUS_CODE_FIELD, STATUS_MESSAGE_FIELD, TRACER_NAME,
};
pub use resource::service_resource;
