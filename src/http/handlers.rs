//! Method handlers.
//!
//! # Responsibilities
//! - POST: echo the posted number
//! - GET (and every other method): compute the Fibonacci number of the body
//!
//! # Design Decisions
//! - Each handler runs inside its own span named after the method
//! - Only the GET path computes, inside a nested `Fibonacci` span; POST is an
//!   echo and never calls into `compute`
//! - GET takes its input from the body, not the query string
//! - Calculation errors end up in the span status and in the reply text,
//!   never in the HTTP status

use axum::body::Body;
use tracing::field::Empty;
use tracing::Instrument;

use crate::compute::{fibonacci, FibonacciError};
use crate::http::request::{parse_signed, parse_unsigned, read_body};
use crate::http::response;
use crate::observability::{STATUS_CODE_FIELD, STATUS_MESSAGE_FIELD, TRACER_NAME};

/// Echo the posted integer.
pub async fn handle_post(body: Body, max_body_bytes: usize) -> String {
    let span = tracing::info_span!(target: TRACER_NAME, "POST");

    async move {
        let input = read_body(body, max_body_bytes).await;
        if input.is_empty() {
            return response::NO_INPUT.to_string();
        }

        response::posted(parse_signed(&input))
    }
    .instrument(span)
    .await
}

/// Reply with the Fibonacci number of the body's integer.
pub async fn handle_get(body: Body, max_body_bytes: usize) -> String {
    let span = tracing::info_span!(target: TRACER_NAME, "GET");

    async move {
        let input = read_body(body, max_body_bytes).await;
        if input.is_empty() {
            return response::NO_INPUT.to_string();
        }

        let n = parse_unsigned(&input);
        match traced_fibonacci(n) {
            Ok(result) => response::fibonacci_result(n, result),
            Err(e) => response::calculation_error(&e),
        }
    }
    .instrument(span)
    .await
}

/// Run the computation inside a `Fibonacci` span, recording failures on it.
pub fn traced_fibonacci(n: u32) -> Result<u64, FibonacciError> {
    let span = tracing::info_span!(
        target: TRACER_NAME,
        "Fibonacci",
        n,
        otel.status_code = Empty,
        otel.status_message = Empty,
    );
    let _guard = span.enter();

    let result = fibonacci(u64::from(n));
    if let Err(e) = &result {
        tracing::error!(target: TRACER_NAME, { exception.message = %e }, "exception");
        span.record(STATUS_CODE_FIELD, "ERROR");
        span.record(STATUS_MESSAGE_FIELD, tracing::field::display(e));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::testing::{attribute, find, memory_pipeline};
    use opentelemetry::trace::Status;
    use opentelemetry::Value;

    const LIMIT: usize = 1024;

    #[tokio::test]
    async fn test_post_echo() {
        assert_eq!(handle_post(Body::from("5"), LIMIT).await, "The number you posted was 5");
        assert_eq!(handle_post(Body::from("-3"), LIMIT).await, "The number you posted was -3");
    }

    #[tokio::test]
    async fn test_post_malformed_is_zero() {
        assert_eq!(handle_post(Body::from("five"), LIMIT).await, "The number you posted was 0");
    }

    #[tokio::test]
    async fn test_post_overflow_saturates() {
        assert_eq!(
            handle_post(Body::from("99999999999999999999"), LIMIT).await,
            "The number you posted was 9223372036854775807"
        );
        assert_eq!(
            handle_post(Body::from("-99999999999999999999"), LIMIT).await,
            "The number you posted was -9223372036854775808"
        );
    }

    #[tokio::test]
    async fn test_post_does_not_compute() {
        // 1000 is far past the Fibonacci limit; POST only echoes it.
        assert_eq!(
            handle_post(Body::from("1000"), LIMIT).await,
            "The number you posted was 1000"
        );
    }

    #[tokio::test]
    async fn test_empty_body() {
        assert_eq!(handle_post(Body::empty(), LIMIT).await, "You didn't input anything");
        assert_eq!(handle_get(Body::empty(), LIMIT).await, "You didn't input anything");
    }

    #[tokio::test]
    async fn test_get_computes() {
        assert_eq!(handle_get(Body::from("10"), LIMIT).await, "The fibonacci number of 10 is 55");
        assert_eq!(handle_get(Body::from("1"), LIMIT).await, "The fibonacci number of 1 is 1");
    }

    #[tokio::test]
    async fn test_get_malformed_is_zero() {
        assert_eq!(handle_get(Body::from("x"), LIMIT).await, "The fibonacci number of 0 is 0");
        assert_eq!(handle_get(Body::from("  "), LIMIT).await, "The fibonacci number of 0 is 0");
        assert_eq!(handle_get(Body::from("-4"), LIMIT).await, "The fibonacci number of 0 is 0");
    }

    #[tokio::test]
    async fn test_get_out_of_range() {
        assert_eq!(
            handle_get(Body::from("100"), LIMIT).await,
            "An error occurred during calculation: unsupported fibonacci number 100: too large"
        );
    }

    #[tokio::test]
    async fn test_get_beyond_u32_is_out_of_range() {
        assert_eq!(
            handle_get(Body::from("4294967296"), LIMIT).await,
            "An error occurred during calculation: unsupported fibonacci number 4294967295: too large"
        );
        assert_eq!(
            handle_get(Body::from("99999999999999999999"), LIMIT).await,
            "An error occurred during calculation: unsupported fibonacci number 4294967295: too large"
        );
    }

    #[tokio::test]
    async fn test_get_error_is_recorded_on_span() {
        let (_provider, exporter, telemetry) = memory_pipeline();

        telemetry.scope(handle_get(Body::from("94"), LIMIT)).await;

        let spans = exporter.get_finished_spans().unwrap();
        let fib = find(&spans, "Fibonacci");
        let get = find(&spans, "GET");
        assert_eq!(fib.status, Status::error("unsupported fibonacci number 94: too large"));
        assert_eq!(attribute(fib, "n"), Some(&Value::I64(94)));
        assert_eq!(fib.events.events.len(), 1);
        assert_eq!(fib.events.events[0].name, "exception");
        assert_eq!(fib.parent_span_id, get.span_context.span_id());
        assert_eq!(get.status, Status::Unset);
    }

    #[tokio::test]
    async fn test_successful_computation_leaves_status_unset() {
        let (_provider, exporter, telemetry) = memory_pipeline();

        telemetry.scope(handle_get(Body::from("20"), LIMIT)).await;

        let spans = exporter.get_finished_spans().unwrap();
        let fib = find(&spans, "Fibonacci");
        assert_eq!(fib.status, Status::Unset);
        assert!(fib.events.events.is_empty());
    }

    #[test]
    fn test_traced_fibonacci_without_subscriber() {
        assert_eq!(traced_fibonacci(10), Ok(55));
        assert!(traced_fibonacci(94).is_err());
    }
}
