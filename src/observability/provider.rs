//! Span pipeline assembly.
//!
//! # Responsibilities
//! - Build an `SdkTracerProvider` that batches spans into an exporter
//! - Build the `tracing` layer that feeds it spans of one target
//!
//! # Design Decisions
//! - The layer is filtered to the tracer scope, so library spans and log
//!   events never become exported spans or span events
//! - Location, thread and busy/idle attributes are off so the trace file
//!   stays stable between runs

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{BatchConfig, BatchSpanProcessor, SdkTracerProvider, SpanExporter};
use opentelemetry_sdk::Resource;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{Layer, Registry};

/// Tracing target (instrumentation scope) used by this service's spans.
pub const TRACER_NAME: &str = "fib";

/// Span field that sets the status (`"ERROR"` or `"OK"`).
pub const STATUS_CODE_FIELD: &str = "otel.status_code";

/// Span field carrying the status description.
pub const STATUS_MESSAGE_FIELD: &str = "otel.status_message";

/// A boxed layer that exports spans; added directly on top of the registry.
pub type ExportLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Provider exporting through a bounded batch processor.
pub fn batch_provider<E>(exporter: E, batch: BatchConfig, resource: Resource) -> SdkTracerProvider
where
    E: SpanExporter + 'static,
{
    let processor = BatchSpanProcessor::builder(exporter).with_batch_config(batch).build();

    SdkTracerProvider::builder()
        .with_span_processor(processor)
        .with_resource(resource)
        .build()
}

/// Layer turning spans of target `scope` into spans of `provider`.
pub fn export_layer(provider: &SdkTracerProvider, scope: &str) -> ExportLayer {
    let tracer = provider.tracer(scope.to_string());
    let scope = scope.to_string();

    tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_location(false)
        .with_threads(false)
        .with_tracked_inactivity(false)
        .with_filter(filter_fn(move |metadata| metadata.target() == scope))
        .boxed()
}
