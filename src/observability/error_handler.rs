//! What the trace file exporter does with write failures.
//!
//! Export runs on the batch thread, off the request path, so there is no
//! caller to return an error to. Every failure goes to an [`ErrorHandler`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::observability::exporter::ExportError;

/// Receives errors the exporter cannot propagate.
pub trait ErrorHandler: Send + Sync + 'static {
    fn handle(&self, error: &ExportError);
}

/// Attempt-and-ignore: failures are dropped without a trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreErrors;

impl ErrorHandler for IgnoreErrors {
    fn handle(&self, _error: &ExportError) {}
}

/// Logs each failure as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrors;

impl ErrorHandler for LogErrors {
    fn handle(&self, error: &ExportError) {
        tracing::warn!(error = %error, "Span export failed");
    }
}

/// Counts failures; clones share the count.
#[derive(Debug, Clone, Default)]
pub struct CountErrors {
    count: Arc<AtomicUsize>,
}

impl CountErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ErrorHandler for CountErrors {
    fn handle(&self, _error: &ExportError) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
