//! Trace file exporter.
//!
//! # Responsibilities
//! - Serialize batches of finished spans to a `Write` sink
//! - Attach the provider's resource to every record
//!
//! # Design Decisions
//! - One indented JSON document per span, newline separated
//! - Timestamps are optional so the output can be diffed between runs
//! - Write failures go to an [`ErrorHandler`], never back into the SDK

use opentelemetry::trace::Status;
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::trace::{SpanData, SpanExporter};
use opentelemetry_sdk::Resource;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::observability::error_handler::{ErrorHandler, LogErrors};

/// Errors raised while writing spans.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("span export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("span serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A previous export panicked while holding the sink.
    #[error("trace sink is poisoned")]
    Poisoned,
}

type Attributes = BTreeMap<String, JsonValue>;

/// Serialized form of one span.
#[derive(Serialize)]
struct ExportedSpan<'a> {
    name: &'a str,
    trace_id: String,
    span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_span_id: Option<String>,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time_unix_nano: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time_unix_nano: Option<u128>,
    attributes: Attributes,
    events: Vec<ExportedEvent<'a>>,
    status: ExportedStatus<'a>,
    resource: &'a Attributes,
    instrumentation_scope: &'a str,
}

#[derive(Serialize)]
struct ExportedEvent<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_unix_nano: Option<u128>,
    attributes: Attributes,
}

#[derive(Serialize)]
#[serde(tag = "code", rename_all = "lowercase")]
enum ExportedStatus<'a> {
    Unset,
    Ok,
    Error { description: &'a str },
}

impl<'a> From<&'a Status> for ExportedStatus<'a> {
    fn from(status: &'a Status) -> Self {
        match status {
            Status::Unset => ExportedStatus::Unset,
            Status::Ok => ExportedStatus::Ok,
            Status::Error { description } => ExportedStatus::Error { description },
        }
    }
}

fn json_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::from(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        other => JsonValue::from(other.as_str().into_owned()),
    }
}

fn attributes<'a>(pairs: impl IntoIterator<Item = &'a KeyValue>) -> Attributes {
    pairs
        .into_iter()
        .map(|kv| (kv.key.as_str().to_string(), json_value(&kv.value)))
        .collect()
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos()
}

/// Writes spans as human-readable JSON to any `Write` sink.
pub struct PrettyWriterExporter<W: Write + Send + 'static> {
    writer: Mutex<W>,
    resource: Attributes,
    timestamps: bool,
    errors: Arc<dyn ErrorHandler>,
}

impl<W: Write + Send + 'static> PrettyWriterExporter<W> {
    /// Create an exporter that includes timestamps and logs write failures.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            resource: Attributes::new(),
            timestamps: true,
            errors: Arc::new(LogErrors),
        }
    }

    /// Omit start, end and event times from the output.
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    pub fn with_error_handler(mut self, handler: impl ErrorHandler) -> Self {
        self.errors = Arc::new(handler);
        self
    }

    fn write_batch(&self, batch: &[SpanData]) -> Result<(), ExportError> {
        let mut writer = self.writer.lock().map_err(|_| ExportError::Poisoned)?;
        for span in batch {
            serde_json::to_writer_pretty(&mut *writer, &self.exported(span))?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    fn exported<'a>(&'a self, span: &'a SpanData) -> ExportedSpan<'a> {
        let stamp = |time: SystemTime| self.timestamps.then(|| unix_nanos(time));
        let parent = span.parent_span_id;

        ExportedSpan {
            name: &span.name,
            trace_id: span.span_context.trace_id().to_string(),
            span_id: span.span_context.span_id().to_string(),
            parent_span_id: (parent != opentelemetry::trace::SpanId::INVALID).then(|| parent.to_string()),
            kind: format!("{:?}", span.span_kind),
            start_time_unix_nano: stamp(span.start_time),
            end_time_unix_nano: stamp(span.end_time),
            attributes: attributes(&span.attributes),
            events: span
                .events
                .events
                .iter()
                .map(|event| ExportedEvent {
                    name: &event.name,
                    time_unix_nano: stamp(event.timestamp),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            status: ExportedStatus::from(&span.status),
            resource: &self.resource,
            instrumentation_scope: span.instrumentation_scope.name(),
        }
    }
}

impl PrettyWriterExporter<BufWriter<File>> {
    /// Create (or truncate) `path` and write spans to it.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send + 'static> fmt::Debug for PrettyWriterExporter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyWriterExporter")
            .field("timestamps", &self.timestamps)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send + 'static> SpanExporter for PrettyWriterExporter<W> {
    async fn export(&self, batch: Vec<SpanData>) -> OTelSdkResult {
        if let Err(error) = self.write_batch(&batch) {
            self.errors.handle(&error);
        }
        Ok(())
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource
            .iter()
            .map(|(key, value)| (key.as_str().to_string(), json_value(value)))
            .collect();
    }
}
