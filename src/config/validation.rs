//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, batch sizes consistent)
//! - Check the bind address parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("tracing.batch.max_export_batch_size ({batch}) exceeds max_queue_size ({queue})")]
    BatchLargerThanQueue { batch: usize, queue: usize },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let limits = &config.limits;
    if limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }
    if limits.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("limits.request_timeout_secs"));
    }

    let tracing = &config.tracing;
    if tracing.output_path.trim().is_empty() {
        errors.push(ValidationError::Empty("tracing.output_path"));
    }
    if tracing.scope.trim().is_empty() {
        errors.push(ValidationError::Empty("tracing.scope"));
    }

    let batch = &tracing.batch;
    if batch.max_queue_size == 0 {
        errors.push(ValidationError::Zero("tracing.batch.max_queue_size"));
    }
    if batch.max_export_batch_size == 0 {
        errors.push(ValidationError::Zero("tracing.batch.max_export_batch_size"));
    }
    if batch.max_export_batch_size > batch.max_queue_size && batch.max_queue_size > 0 {
        errors.push(ValidationError::BatchLargerThanQueue {
            batch: batch.max_export_batch_size,
            queue: batch.max_queue_size,
        });
    }
    if batch.scheduled_delay_ms == 0 {
        errors.push(ValidationError::Zero("tracing.batch.scheduled_delay_ms"));
    }

    if config.resource.service_name.trim().is_empty() {
        errors.push(ValidationError::Empty("resource.service_name"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
