//! Response capture for logging.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::http::response::Parts;

use crate::http::request::{charset_of, flatten_headers};

/// Immutable capture of an outbound response, taken after the handler ran.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub status: u16,
    /// Header name → value, lowercase names, last value wins.
    pub headers: BTreeMap<String, String>,
    /// Buffered body bytes; empty unless the level captures bodies.
    pub body: Bytes,
    /// Charset declared in Content-Type, if any.
    pub charset: Option<String>,
}

impl ResponseSnapshot {
    /// Capture from response parts plus the buffered body bytes.
    pub fn capture(parts: &Parts, body: Bytes) -> Self {
        Self {
            status: parts.status.as_u16(),
            headers: flatten_headers(&parts.headers),
            charset: charset_of(&parts.headers),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Response;

    #[test]
    fn test_capture_status_and_headers() {
        let response = Response::builder()
            .status(404)
            .header("Content-Type", "application/json; charset=utf-8")
            .body(Body::empty())
            .unwrap();
        let (parts, _) = response.into_parts();

        let snapshot = ResponseSnapshot::capture(&parts, Bytes::from_static(b"{}"));

        assert_eq!(snapshot.status, 404);
        assert_eq!(
            snapshot.headers.get("content-type"),
            Some(&"application/json; charset=utf-8".to_string())
        );
        assert_eq!(snapshot.charset.as_deref(), Some("utf-8"));
        assert_eq!(&snapshot.body[..], b"{}");
    }
}
