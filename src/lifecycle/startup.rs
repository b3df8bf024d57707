//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the span pipeline from configuration
//! - Turn every failure into a single fatal error type
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The trace file is truncated on every start
//! - Listeners start last (traffic only when ready)

use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::{ConfigError, ServiceConfig};
use crate::observability::{batch_provider, PrettyWriterExporter};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot create trace file {path}: {source}")]
    TraceFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("cannot bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Resource attributes described by the configuration.
pub fn service_resource(config: &ServiceConfig) -> Resource {
    crate::observability::service_resource(
        &config.resource.service_name,
        &config.resource.service_version,
        &config.resource.environment,
    )
}

/// Create the trace file and start the batch export pipeline.
pub fn build_tracer_provider(config: &ServiceConfig) -> Result<SdkTracerProvider, StartupError> {
    let trace = &config.tracing;
    let exporter = PrettyWriterExporter::create(&trace.output_path).map_err(|source| StartupError::TraceFile {
        path: trace.output_path.clone(),
        source,
    })?;
    let exporter = if trace.timestamps {
        exporter
    } else {
        exporter.without_timestamps()
    };

    let provider = batch_provider(exporter, trace.batch.batch_config(), service_resource(config));

    tracing::debug!(
        output_path = %trace.output_path,
        scope = %trace.scope,
        max_queue_size = trace.batch.max_queue_size,
        "Span pipeline started"
    );

    Ok(provider)
}

/// Bind the configured listener address.
pub async fn bind_listener(config: &ServiceConfig) -> Result<tokio::net::TcpListener, StartupError> {
    let address: SocketAddr = config
        .listener
        .bind_address
        .parse()
        .map_err(|_| StartupError::BindAddress(config.listener.bind_address.clone()))?;

    tokio::net::TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}
