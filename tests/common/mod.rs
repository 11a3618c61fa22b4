//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt;
use tracing::Level;

use http_logger::{build_router, AppConfig, LogLevel, LogSink, LoggerState};

/// Sink that records every write for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    writes: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    /// Every write, in order.
    pub fn writes(&self) -> Vec<(Level, String)> {
        self.writes.lock().unwrap().clone()
    }

    /// Main records only (warnings filtered out).
    pub fn records(&self) -> Vec<(Level, String)> {
        self.writes()
            .into_iter()
            .filter(|(severity, _)| *severity != Level::WARN && *severity != Level::ERROR)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, severity: Level, message: &str) {
        self.writes
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

/// Demo app wired to a recording sink at the given level.
#[allow(dead_code)]
pub fn test_app(level: LogLevel) -> (Router, Arc<RecordingSink>) {
    let mut config = AppConfig::default();
    config.logger.log_level = level;
    app_with_config(config)
}

/// Demo app with full config control (e.g. `enabled = false`).
pub fn app_with_config(config: AppConfig) -> (Router, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let state = LoggerState::with_sink(config.logger.clone(), sink.clone());
    (build_router(&config, state), sink)
}

/// Read a body to completion and decode it as UTF-8.
#[allow(dead_code)]
pub async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Split a record message into its request and response JSON values.
pub fn parse_record(message: &str) -> (serde_json::Value, serde_json::Value) {
    let request_start =
        message.find("Request: ").expect("no request section") + "Request: ".len();
    let response_marker = message.find(", Response: ").expect("no response section");
    let duration_marker = message.rfind(", Duration: ").expect("no duration section");

    let request_json = &message[request_start..response_marker];
    let response_json = &message[response_marker + ", Response: ".len()..duration_marker];
    (
        serde_json::from_str(request_json).expect("request side is not JSON"),
        serde_json::from_str(response_json).expect("response side is not JSON"),
    )
}
