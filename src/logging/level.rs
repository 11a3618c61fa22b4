//! Verbosity levels and field-inclusion tables.
//!
//! # Responsibilities
//! - Define the ordered verbosity levels (NONE < INFO < DEBUG < TRACE)
//! - Centralize which request/response fields each level logs
//! - Map levels to sink severities
//!
//! # Design Decisions
//! - Each level's field set is a prefix of one fixed ordered table, so the
//!   superset relationship between levels holds by construction
//! - The formatter walks the table; no per-call-site level branching

use serde::{Deserialize, Serialize};

/// Verbosity level for request/response logging.
///
/// Levels are ordered: each level logs a superset of the fields logged by
/// the level below it. `None` suppresses logging entirely.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging at all.
    None,
    /// Method, URI, headers, status, and duration.
    Info,
    /// INFO fields plus the query string and parsed parameters.
    #[default]
    Debug,
    /// DEBUG fields plus the request and response bodies.
    Trace,
}

/// A request-side field that can appear in the log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    Method,
    Uri,
    Headers,
    QueryString,
    Parameters,
    Body,
}

/// A response-side field that can appear in the log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
    Status,
    Headers,
    Body,
}

/// Request fields in inclusion order. Levels take prefixes of this table.
const REQUEST_FIELDS: [RequestField; 6] = [
    RequestField::Method,
    RequestField::Uri,
    RequestField::Headers,
    RequestField::QueryString,
    RequestField::Parameters,
    RequestField::Body,
];

/// Response fields in inclusion order. Levels take prefixes of this table.
const RESPONSE_FIELDS: [ResponseField; 3] = [
    ResponseField::Status,
    ResponseField::Headers,
    ResponseField::Body,
];

impl LogLevel {
    /// Request fields included at this level.
    pub fn request_fields(self) -> &'static [RequestField] {
        let count = match self {
            LogLevel::None => 0,
            LogLevel::Info => 3,
            LogLevel::Debug => 5,
            LogLevel::Trace => REQUEST_FIELDS.len(),
        };
        &REQUEST_FIELDS[..count]
    }

    /// Response fields included at this level.
    pub fn response_fields(self) -> &'static [ResponseField] {
        let count = match self {
            LogLevel::None => 0,
            LogLevel::Info | LogLevel::Debug => 2,
            LogLevel::Trace => RESPONSE_FIELDS.len(),
        };
        &RESPONSE_FIELDS[..count]
    }

    /// Whether the middleware must buffer bodies at this level.
    pub fn captures_body(self) -> bool {
        matches!(self, LogLevel::Trace)
    }

    /// Whether any logging happens at this level.
    pub fn is_enabled(self) -> bool {
        !matches!(self, LogLevel::None)
    }

    /// Sink severity for the main record. `None` never reaches the sink.
    pub fn severity(self) -> Option<tracing::Level> {
        match self {
            LogLevel::None => None,
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}
