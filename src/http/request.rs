//! Request handling.
//!
//! # Responsibilities
//! - Attach a unique request ID (UUID v4) to every request
//! - Read the request body under a size cap
//! - Parse numeric input leniently
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing; an incoming
//!   `x-request-id` is kept
//! - A body that cannot be read counts as no input
//! - Malformed numbers become 0 instead of an error response; numbers past
//!   the target type's range saturate at its bound
//! - Surrounding whitespace is ignored, so `"10\n"` reads as 10

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use std::num::{IntErrorKind, ParseIntError};
use tower_http::request_id::{MakeRequestId, RequestId};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The request ID header value, or `""` when absent.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Read the whole body as text, at most `limit` bytes.
///
/// Read failures and oversized bodies are logged and yield an empty string.
pub async fn read_body(body: Body, limit: usize) -> String {
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, limit, "Failed to read request body");
            String::new()
        }
    }
}

/// Value to use for a number that failed to parse.
fn fallback<T>(error: &ParseIntError, min: T, max: T, zero: T) -> T {
    match error.kind() {
        IntErrorKind::PosOverflow => max,
        IntErrorKind::NegOverflow => min,
        _ => zero,
    }
}

/// Parse a signed integer. Malformed input is 0; overflow saturates.
pub fn parse_signed(input: &str) -> i64 {
    input
        .trim()
        .parse()
        .unwrap_or_else(|e| fallback(&e, i64::MIN, i64::MAX, 0))
}

/// Parse a 32-bit unsigned integer. Malformed input is 0; values above
/// `u32::MAX` saturate, so they still reach the range check.
pub fn parse_unsigned(input: &str) -> u32 {
    input
        .trim()
        .parse()
        .unwrap_or_else(|e| fallback(&e, u32::MIN, u32::MAX, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_signed("5"), 5);
        assert_eq!(parse_signed("-12"), -12);
        assert_eq!(parse_signed(" 42\n"), 42);
        assert_eq!(parse_signed("abc"), 0);
        assert_eq!(parse_signed("1.5"), 0);
        assert_eq!(parse_signed("   "), 0);
    }

    #[test]
    fn test_parse_signed_saturates() {
        assert_eq!(parse_signed("9223372036854775808"), i64::MAX);
        assert_eq!(parse_signed("-9223372036854775809"), i64::MIN);
        assert_eq!(parse_signed("99999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_parse_unsigned() {
        assert_eq!(parse_unsigned("10"), 10);
        assert_eq!(parse_unsigned("10\r\n"), 10);
        assert_eq!(parse_unsigned("-1"), 0);
        assert_eq!(parse_unsigned("4294967295"), u32::MAX);
        assert_eq!(parse_unsigned("ten"), 0);
    }

    #[test]
    fn test_parse_unsigned_saturates() {
        assert_eq!(parse_unsigned("4294967296"), u32::MAX);
        assert_eq!(parse_unsigned("99999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_request_id_generation() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let mut make = MakeRequestUuid;

        let first = make.make_request_id(&request).unwrap();
        let second = make.make_request_id(&request).unwrap();

        let first = first.header_value().to_str().unwrap().to_string();
        assert!(uuid::Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second.header_value().to_str().unwrap());
    }

    #[test]
    fn test_request_id_lookup() {
        let request = Request::builder()
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_id(&request), "abc-123");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request_id(&request), "");
    }

    #[tokio::test]
    async fn test_read_body() {
        assert_eq!(read_body(Body::from("17"), 1024).await, "17");
        assert_eq!(read_body(Body::empty(), 1024).await, "");
    }

    #[tokio::test]
    async fn test_oversized_body_counts_as_empty() {
        let body = Body::from("1".repeat(64));
        assert_eq!(read_body(body, 16).await, "");
    }
}
