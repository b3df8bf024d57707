//! Span-wrapped request dispatch.
//!
//! # Responsibilities
//! - Open the root `Route` span for every request
//! - Dispatch to the handler chosen by method, inside that span
//!
//! # Design Decisions
//! - The handler future is instrumented with the root span, so the span is
//!   entered on every poll and closed exactly once when the future is dropped
//! - Spans go to whatever dispatcher is current; the HTTP layer sets it from
//!   the injected telemetry context, for polling and for drop alike

use axum::body::Body;
use axum::http::Request;
use tracing::Instrument;

use crate::http::handlers::{handle_get, handle_post};
use crate::http::request::request_id;
use crate::observability::TRACER_NAME;
use crate::routing::matcher::HandlerKind;

/// Serve one request and return the reply text.
pub async fn dispatch_request(request: Request<Body>, max_body_bytes: usize) -> String {
    let kind = HandlerKind::for_method(request.method());
    let span = tracing::info_span!(
        target: TRACER_NAME,
        parent: None,
        "Route",
        http.method = %request.method(),
        request_id = request_id(&request),
    );

    tracing::debug!(method = %request.method(), handler = ?kind, "Dispatching request");

    let body = request.into_body();
    async move {
        match kind {
            HandlerKind::Post => handle_post(body, max_body_bytes).await,
            HandlerKind::Get => handle_get(body, max_body_bytes).await,
        }
    }
    .instrument(span)
    .await
}
