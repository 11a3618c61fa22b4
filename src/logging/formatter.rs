//! Log record assembly and emission.
//!
//! # Responsibilities
//! - Build the level-gated request and response JSON maps
//! - Decode buffered bodies using the declared charset
//! - Serialize with a local fallback; formatting never fails the request
//! - Write exactly one line to the sink per invocation
//!
//! # Design Decisions
//! - Field inclusion is driven by the tables in `level.rs`, not by ad-hoc
//!   branching here
//! - A serialization failure degrades that side of the record to `{}` and
//!   emits a warning through the same sink

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::Level;

use crate::http::request::RequestSnapshot;
use crate::http::response::ResponseSnapshot;
use crate::logging::level::{LogLevel, RequestField, ResponseField};
use crate::logging::sink::LogSink;

/// Substituted for a non-empty body that cannot be decoded with its
/// declared charset.
pub const UNREADABLE_BODY: &str = "<unreadable body>";

/// Substituted for a field map that failed JSON serialization.
const EMPTY_JSON: &str = "{}";

/// Format and emit one record for a completed invocation.
///
/// `response` is `None` when the handler failed before producing one; the
/// response side of the record is then an empty map.
pub fn log_invocation(
    sink: &dyn LogSink,
    level: LogLevel,
    handler: &str,
    request: &RequestSnapshot,
    response: Option<&ResponseSnapshot>,
    duration_ms: u128,
) {
    let severity = match level.severity() {
        Some(severity) => severity,
        None => return,
    };

    let request_map = build_request_map(level, request);
    let response_map = match response {
        Some(snapshot) => build_response_map(level, snapshot),
        None => Map::new(),
    };

    let message = format!(
        "Handler: {}, Request: {}, Response: {}, Duration: {}ms",
        handler,
        to_json(sink, &Value::Object(request_map)),
        to_json(sink, &Value::Object(response_map)),
        duration_ms,
    );

    sink.write(severity, &message);
}

fn build_request_map(level: LogLevel, snapshot: &RequestSnapshot) -> Map<String, Value> {
    let mut map = Map::new();
    for field in level.request_fields() {
        match field {
            RequestField::Method => {
                map.insert("method".into(), json!(snapshot.method));
            }
            RequestField::Uri => {
                map.insert("uri".into(), json!(snapshot.uri));
            }
            RequestField::Headers => {
                map.insert("headers".into(), json!(snapshot.headers));
            }
            RequestField::QueryString => {
                map.insert("query_string".into(), json!(snapshot.query));
            }
            RequestField::Parameters => {
                map.insert("parameters".into(), json!(snapshot.parameters));
            }
            RequestField::Body => {
                map.insert(
                    "body".into(),
                    json!(decode_body(&snapshot.body, snapshot.charset.as_deref())),
                );
            }
        }
    }
    map
}

fn build_response_map(level: LogLevel, snapshot: &ResponseSnapshot) -> Map<String, Value> {
    let mut map = Map::new();
    for field in level.response_fields() {
        match field {
            ResponseField::Status => {
                map.insert("status".into(), json!(snapshot.status));
            }
            ResponseField::Headers => {
                map.insert("headers".into(), json!(snapshot.headers));
            }
            ResponseField::Body => {
                map.insert(
                    "body".into(),
                    json!(decode_body(&snapshot.body, snapshot.charset.as_deref())),
                );
            }
        }
    }
    map
}

/// Decode buffered body bytes for logging.
///
/// An empty buffer yields an empty string. A non-empty buffer is decoded
/// per the declared charset; decode failure (or an unsupported charset)
/// yields [`UNREADABLE_BODY`] instead of an error.
fn decode_body(body: &[u8], charset: Option<&str>) -> String {
    if body.is_empty() {
        return String::new();
    }
    match charset.unwrap_or("utf-8") {
        "utf-8" | "utf8" | "us-ascii" | "ascii" => match std::str::from_utf8(body) {
            Ok(text) => text.to_string(),
            Err(_) => UNREADABLE_BODY.to_string(),
        },
        _ => UNREADABLE_BODY.to_string(),
    }
}

/// Serialize log fields, falling back to `{}` with a warning on failure.
fn to_json<T: Serialize>(sink: &dyn LogSink, fields: &T) -> String {
    match serde_json::to_string(fields) {
        Ok(text) => text,
        Err(err) => {
            sink.write(
                Level::WARN,
                &format!("failed to serialize log fields: {err}"),
            );
            EMPTY_JSON.to_string()
        }
    }
}
