//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single `/` route
//! - Wire up middleware (access log, request ID, timeout)
//! - Run every request under the injected telemetry context
//! - Bind server to listener and stop on shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    routing::any,
    Router,
};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::observability::Telemetry;
use crate::routing::dispatch_request;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub telemetry: Telemetry,
    pub max_body_bytes: usize,
}

/// HTTP server for the Fibonacci service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and telemetry.
    pub fn new(config: ServiceConfig, telemetry: Telemetry) -> Self {
        let state = AppState {
            telemetry,
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TimeoutLayer::new(Duration::from_secs(config.limits.request_timeout_secs)));

        Router::new()
            .route("/", any(route_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve connections from `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Entry point for every method on `/`.
async fn route_handler(State(state): State<AppState>, request: Request<Body>) -> String {
    state
        .telemetry
        .scope(dispatch_request(request, state.max_body_bytes))
        .await
}
