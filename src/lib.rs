//! HTTP request/response logging middleware library.

pub mod config;
pub mod http;
pub mod logging;

pub use config::schema::{AppConfig, HttpLoggerConfig};
pub use http::middleware::request_logger::{request_logger, LoggerState};
pub use http::server::{build_router, HttpServer};
pub use logging::level::LogLevel;
pub use logging::sink::{LogSink, TracingSink};
