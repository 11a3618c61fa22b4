//! Request capture for logging.
//!
//! # Responsibilities
//! - Snapshot method, URI, headers, query string, and parsed parameters
//! - Carry buffered body bytes and the declared charset for the formatter
//!
//! # Design Decisions
//! - Header names are lowercased; duplicate names keep the last value seen
//! - The snapshot stores raw body bytes; decoding happens at format time
//! - Snapshots are request-local and never outlive the invocation

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::http::{header, request::Parts, HeaderMap};
use url::form_urlencoded;

/// Immutable capture of an inbound request, taken before the handler runs.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    pub method: String,
    /// Request path, without the query string.
    pub uri: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// Parsed query parameters; a repeated key keeps every value.
    pub parameters: BTreeMap<String, Vec<String>>,
    /// Header name → value, lowercase names, last value wins.
    pub headers: BTreeMap<String, String>,
    /// Buffered body bytes; empty unless the level captures bodies.
    pub body: Bytes,
    /// Charset declared in Content-Type, if any.
    pub charset: Option<String>,
}

impl RequestSnapshot {
    /// Capture from request parts plus the buffered body bytes.
    pub fn capture(parts: &Parts, body: Bytes) -> Self {
        Self {
            method: parts.method.to_string(),
            uri: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_owned),
            parameters: parse_parameters(parts.uri.query()),
            headers: flatten_headers(&parts.headers),
            charset: charset_of(&parts.headers),
            body,
        }
    }
}

/// Flatten a header map to name → single value.
///
/// Names come out lowercase (as the `http` crate stores them); when a name
/// carries multiple values the last one wins. Values that are not valid
/// UTF-8 are replaced lossily rather than failing the log operation.
pub(crate) fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (name, value) in headers {
        out.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    out
}

/// Extract the charset parameter from the Content-Type header, lowercased.
pub(crate) fn charset_of(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_ascii_lowercase())
}

/// Parse a query string into a multi-valued parameter map.
fn parse_parameters(query: Option<&str>) -> BTreeMap<String, Vec<String>> {
    let mut parameters: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(query) = query {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            parameters
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
    }
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    fn parts_for(req: Request<Body>) -> Parts {
        req.into_parts().0
    }

    #[test]
    fn test_capture_splits_path_and_query() {
        let req = Request::builder()
            .method("GET")
            .uri("/orders/42?expand=items&expand=totals&page=2")
            .body(Body::empty())
            .unwrap();

        let snapshot = RequestSnapshot::capture(&parts_for(req), Bytes::new());

        assert_eq!(snapshot.method, "GET");
        assert_eq!(snapshot.uri, "/orders/42");
        assert_eq!(
            snapshot.query.as_deref(),
            Some("expand=items&expand=totals&page=2")
        );
        assert_eq!(
            snapshot.parameters.get("expand"),
            Some(&vec!["items".to_string(), "totals".to_string()])
        );
        assert_eq!(snapshot.parameters.get("page"), Some(&vec!["2".to_string()]));
    }

    #[test]
    fn test_headers_are_lowercased_last_value_wins() {
        let req = Request::builder()
            .uri("/")
            .header("X-Tenant", "alpha")
            .header("X-Tenant", "beta")
            .header("Accept", "application/json")
            .body(Body::empty())
            .unwrap();

        let snapshot = RequestSnapshot::capture(&parts_for(req), Bytes::new());

        assert_eq!(snapshot.headers.get("x-tenant"), Some(&"beta".to_string()));
        assert_eq!(
            snapshot.headers.get("accept"),
            Some(&"application/json".to_string())
        );
        assert!(!snapshot.headers.contains_key("X-Tenant"));
    }

    #[test]
    fn test_charset_extraction() {
        let req = Request::builder()
            .uri("/")
            .header("Content-Type", "text/plain; charset=ISO-8859-1")
            .body(Body::empty())
            .unwrap();
        let snapshot = RequestSnapshot::capture(&parts_for(req), Bytes::new());
        assert_eq!(snapshot.charset.as_deref(), Some("iso-8859-1"));

        let req = Request::builder()
            .uri("/")
            .header("Content-Type", "application/json; charset=\"UTF-8\"")
            .body(Body::empty())
            .unwrap();
        let snapshot = RequestSnapshot::capture(&parts_for(req), Bytes::new());
        assert_eq!(snapshot.charset.as_deref(), Some("utf-8"));

        let req = Request::builder()
            .uri("/")
            .header("Content-Type", "application/json")
            .body(Body::empty())
            .unwrap();
        let snapshot = RequestSnapshot::capture(&parts_for(req), Bytes::new());
        assert_eq!(snapshot.charset, None);
    }

    #[test]
    fn test_no_query_yields_empty_parameters() {
        let req = Request::builder()
            .uri("/orders")
            .body(Body::empty())
            .unwrap();
        let snapshot = RequestSnapshot::capture(&parts_for(req), Bytes::new());
        assert_eq!(snapshot.query, None);
        assert!(snapshot.parameters.is_empty());
    }
}
