//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, body)
//!     → router.rs (open root "Route" span)
//!     → matcher.rs (method → handler kind)
//!     → http::handlers (POST echo | GET compute)
//!     → root span closes when the handler future completes or is dropped
//! ```
//!
//! # Design Decisions
//! - A single route; the method alone selects the handler
//! - Method is not validated: anything but POST is served as GET
//! - The root span has no parent, even if a request-level span is active

pub mod matcher;
pub mod router;

pub use matcher::HandlerKind;
pub use router::dispatch_request;
