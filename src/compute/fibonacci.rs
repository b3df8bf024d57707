//! Bounded iterative Fibonacci.

use thiserror::Error;

/// Largest `n` whose Fibonacci number fits in a `u64`.
pub const MAX_FIBONACCI_INPUT: u64 = 93;

/// Errors returned by [`fibonacci`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FibonacciError {
    /// The result would not fit in 64 bits.
    #[error("unsupported fibonacci number {0}: too large")]
    OutOfRange(u64),
}

/// Compute the `n`th Fibonacci number, with `fibonacci(0) == 0`.
///
/// Runs in O(n) time with two rolling accumulators.
pub fn fibonacci(n: u64) -> Result<u64, FibonacciError> {
    if n <= 1 {
        return Ok(n);
    }

    if n > MAX_FIBONACCI_INPUT {
        return Err(FibonacciError::OutOfRange(n));
    }

    let (mut previous, mut current) = (0u64, 1u64);
    for _ in 2..n {
        let next = previous + current;
        previous = current;
        current = next;
    }

    Ok(previous + current)
}
