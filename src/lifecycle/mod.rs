//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Create trace file → Build tracer provider
//!     → Install subscriber → Bind listener
//!
//! Shutdown (signals.rs, then main):
//!     SIGTERM/SIGINT → Stop accepting → Drain connections
//!     → Flush span pipeline → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, before traffic is accepted
//! - The span pipeline outlives the server so in-flight spans are flushed
//! - Abrupt termination loses spans still in the queue

pub mod signals;
pub mod startup;

pub use signals::shutdown_signal;
pub use startup::{build_tracer_provider, StartupError};
