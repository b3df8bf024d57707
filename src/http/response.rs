//! Plain-text response bodies.
//!
//! Every reply is a 200 with a `text/plain` body; outcomes are told apart by
//! the text alone.

use std::fmt::Display;

/// Reply for an empty request body.
pub const NO_INPUT: &str = "You didn't input anything";

pub fn posted(n: i64) -> String {
    format!("The number you posted was {}", n)
}

pub fn fibonacci_result(n: u32, result: u64) -> String {
    format!("The fibonacci number of {} is {}", n, result)
}

pub fn calculation_error(error: &impl Display) -> String {
    format!("An error occurred during calculation: {}", error)
}
