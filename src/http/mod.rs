//! HTTP handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum router, timeout + body-limit layers)
//!     → middleware/request_logger.rs (API routes only: buffer, time, log)
//!     → handler
//!     → middleware captures the response, emits one record
//!     → unchanged response to the client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{request_logger, LoggerState};
pub use request::RequestSnapshot;
pub use response::ResponseSnapshot;
pub use server::{build_router, HttpServer};
