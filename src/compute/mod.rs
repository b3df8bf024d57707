//! Computation subsystem.
//!
//! # Responsibilities
//! - Pure numeric work performed on behalf of request handlers
//!
//! # Design Decisions
//! - No tracing or HTTP types in here; handlers wrap calls in spans
//! - Out-of-range input is an error value, never a panic or a wrapped result

pub mod fibonacci;

pub use fibonacci::{fibonacci, FibonacciError, MAX_FIBONACCI_INPUT};
