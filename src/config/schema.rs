//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use opentelemetry_sdk::trace::{BatchConfig, BatchConfigBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Span export settings.
    pub tracing: TraceConfig,

    /// Resource attributes attached to every span.
    pub resource: ResourceConfig,

    /// Console logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Limits applied to each request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body read, in bytes.
    pub max_body_bytes: usize,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            request_timeout_secs: 30,
        }
    }
}

/// Span export configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TraceConfig {
    /// File the exporter writes to; truncated at startup.
    pub output_path: String,

    /// Include start/end times in exported spans.
    pub timestamps: bool,

    /// Tracing target whose spans are exported.
    pub scope: String,

    /// Batch processor tuning.
    pub batch: BatchSettings,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            output_path: "traces.txt".to_string(),
            timestamps: false,
            scope: crate::observability::TRACER_NAME.to_string(),
            batch: BatchSettings::default(),
        }
    }
}

/// Batch processor tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Maximum spans waiting for export.
    pub max_queue_size: usize,

    /// Maximum spans per export call.
    pub max_export_batch_size: usize,

    /// Delay between scheduled exports in milliseconds.
    pub scheduled_delay_ms: u64,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_queue_size: 2048,
            max_export_batch_size: 512,
            scheduled_delay_ms: 5000,
        }
    }
}

impl BatchSettings {
    /// Batch processor configuration for these settings.
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfigBuilder::default()
            .with_max_queue_size(self.max_queue_size)
            .with_max_export_batch_size(self.max_export_batch_size)
            .with_scheduled_delay(Duration::from_millis(self.scheduled_delay_ms))
            .build()
    }
}

/// Service identity reported as resource attributes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            service_name: "fib".to_string(),
            service_version: "v0.1.0".to_string(),
            environment: "demo".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or an EnvFilter directive.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
