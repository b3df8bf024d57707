//! fibtrace: Fibonacci over HTTP, one trace per request.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ routing::router ──▶ http::handlers ──▶ compute
//!                     (request id,      (root "Route"      ("POST" echo |
//!                      timeout,          span, method       "GET" + nested
//!                      access log)       dispatch)          "Fibonacci" span)
//!
//!     closed spans ──▶ tracing-opentelemetry ──▶ BatchSpanProcessor ──▶ PrettyWriterExporter ──▶ traces.txt
//! ```
//!
//! Startup is fail-fast: configuration, the trace file and the listener must
//! all be ready before traffic is accepted. On SIGINT/SIGTERM the server
//! drains, then the span pipeline is flushed synchronously.

use std::path::Path;
use std::process::ExitCode;

use fibtrace::config::{load_or_default, DEFAULT_CONFIG_PATH};
use fibtrace::http::HttpServer;
use fibtrace::lifecycle::signals::shutdown_signal;
use fibtrace::lifecycle::startup::{bind_listener, build_tracer_provider, StartupError};
use fibtrace::observability::{export_layer, logging, Telemetry};
use fibtrace::ServiceConfig;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = match load_or_default(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            logging::install(&logging::subscriber(&ServiceConfig::default().observability, None));
            return Err(e.into());
        }
    };

    let provider = match build_tracer_provider(&config) {
        Ok(provider) => provider,
        Err(e) => {
            logging::install(&logging::subscriber(&config.observability, None));
            return Err(e);
        }
    };

    let export = export_layer(&provider, &config.tracing.scope);
    let dispatch = logging::subscriber(&config.observability, Some(export));
    logging::install(&dispatch);

    tracing::info!("fibtrace v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        trace_file = %config.tracing.output_path,
        service_name = %config.resource.service_name,
        environment = %config.resource.environment,
        "Configuration loaded"
    );

    let listener = bind_listener(&config).await?;

    let server = HttpServer::new(config, Telemetry::new(dispatch));
    if let Err(e) = server.run(listener, shutdown_signal()).await {
        tracing::error!(error = %e, "HTTP server failed");
    }

    match provider.shutdown() {
        Ok(()) => tracing::info!("Span pipeline flushed"),
        Err(e) => tracing::error!(error = %e, "Span pipeline shutdown failed"),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
