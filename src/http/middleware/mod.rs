//! Middleware composed into the handler chain at startup.

pub mod request_logger;

pub use request_logger::{request_logger, LoggerState};
