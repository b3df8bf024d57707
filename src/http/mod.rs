//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, telemetry context)
//!     → request.rs (request ID, body read, lenient parsing)
//!     → routing (root span, method dispatch)
//!     → handlers.rs (POST echo | GET compute)
//!     → response.rs (reply text)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
