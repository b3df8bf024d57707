//! Method matching.

use axum::http::Method;

/// Which handler serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Echo the posted number.
    Post,
    /// Compute a Fibonacci number.
    Get,
}

impl HandlerKind {
    /// POST goes to the echo handler; every other method is treated as GET.
    pub fn for_method(method: &Method) -> Self {
        if method == Method::POST {
            HandlerKind::Post
        } else {
            HandlerKind::Get
        }
    }
}
