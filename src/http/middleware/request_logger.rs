//! Request/response logging middleware.
//!
//! # Responsibilities
//! - Time every API handler invocation
//! - Capture request/response snapshots with transparent body buffering
//! - Emit one structured record per invocation through the formatter
//!
//! # Design Decisions
//! - Composed into the router at startup (`route_layer` on the API
//!   sub-router); non-API routes never enter this code
//! - `log_level = "none"` short-circuits before any capture work
//! - A panicking handler is logged with the state available, then the
//!   panic is re-raised to the caller unchanged

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{MatchedPath, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;
use tracing::Level;

use crate::config::schema::HttpLoggerConfig;
use crate::http::request::RequestSnapshot;
use crate::http::response::ResponseSnapshot;
use crate::logging::formatter;
use crate::logging::sink::{LogSink, TracingSink};

/// Shared middleware state: read-only configuration plus the sink.
///
/// Cloned per request; everything captured during an invocation stays
/// request-local, so concurrent requests need no synchronization.
#[derive(Clone)]
pub struct LoggerState {
    pub config: Arc<HttpLoggerConfig>,
    pub sink: Arc<dyn LogSink>,
}

impl LoggerState {
    /// State with the production tracing sink.
    pub fn new(config: HttpLoggerConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// State with an explicit sink (used by tests).
    pub fn with_sink(config: HttpLoggerConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            config: Arc::new(config),
            sink,
        }
    }
}

/// Log one record per API invocation: request, response, and duration.
///
/// The response returned to the caller is byte-identical to what the
/// handler produced; logging is side-effect-only.
pub async fn request_logger(
    State(state): State<LoggerState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let level = state.config.log_level;
    if !level.is_enabled() {
        return next.run(req).await;
    }

    let handler = handler_name(&req);

    // 1. Buffer the request body, but only when the level logs it. The
    //    request is rebuilt from the same bytes, so the handler reads
    //    exactly what the client sent.
    let (parts, body) = req.into_parts();
    let (body, request_bytes) = if level.captures_body() {
        match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => (Body::from(bytes.clone()), bytes),
            Err(err) => {
                // The handler could not have read this body either.
                state.sink.write(
                    Level::WARN,
                    &format!("failed to read request body for {handler}: {err}"),
                );
                return StatusCode::BAD_REQUEST.into_response();
            }
        }
    } else {
        (body, Bytes::new())
    };
    let request_snapshot = RequestSnapshot::capture(&parts, request_bytes);
    let req = Request::from_parts(parts, body);

    // 2. Invoke the handler under a timer. Panics are caught only long
    //    enough to log, then re-raised unchanged.
    let start = Instant::now();
    let outcome = AssertUnwindSafe(next.run(req)).catch_unwind().await;
    let duration_ms = start.elapsed().as_millis();

    let response = match outcome {
        Ok(response) => response,
        Err(panic) => {
            formatter::log_invocation(
                state.sink.as_ref(),
                level,
                &handler,
                &request_snapshot,
                None,
                duration_ms,
            );
            std::panic::resume_unwind(panic);
        }
    };

    // 3. Buffer the response body the same way so the client still
    //    receives it unmodified.
    let (parts, body) = response.into_parts();
    let (body, response_bytes) = if level.captures_body() {
        match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => (Body::from(bytes.clone()), bytes),
            Err(err) => {
                state.sink.write(
                    Level::WARN,
                    &format!("failed to read response body for {handler}: {err}"),
                );
                (Body::empty(), Bytes::new())
            }
        }
    } else {
        (body, Bytes::new())
    };
    let response_snapshot = ResponseSnapshot::capture(&parts, response_bytes);
    let response = Response::from_parts(parts, body);

    // 4. One record per invocation.
    formatter::log_invocation(
        state.sink.as_ref(),
        level,
        &handler,
        &request_snapshot,
        Some(&response_snapshot),
        duration_ms,
    );

    response
}

/// Symbolic name of the invoked handler: method plus matched route
/// pattern, falling back to the raw path when no pattern is available.
fn handler_name(req: &Request<Body>) -> String {
    match req.extensions().get::<MatchedPath>() {
        Some(path) => format!("{} {}", req.method(), path.as_str()),
        None => format!("{} {}", req.method(), req.uri().path()),
    }
}
