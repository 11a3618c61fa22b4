//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! service. All types derive Serde traits for deserialization from config
//! files, and every field has a default so a minimal (or absent) config
//! file works.

use serde::{Deserialize, Serialize};

use crate::logging::level::LogLevel;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Request/response logger settings.
    pub logger: HttpLoggerConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Request/response logger configuration.
///
/// Loaded once at startup and shared read-only with every in-flight
/// request; never mutated at runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpLoggerConfig {
    /// Install the logging middleware at startup. When false, requests
    /// never enter the logger at all.
    pub enabled: bool,

    /// Verbosity: none, info, debug, trace.
    pub log_level: LogLevel,
}

impl Default for HttpLoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: LogLevel::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.limits.max_body_bytes, 2 * 1024 * 1024);
        assert!(config.logger.enabled);
        assert_eq!(config.logger.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [logger]
            log_level = "trace"
            "#,
        )
        .unwrap();

        assert_eq!(config.logger.log_level, LogLevel::Trace);
        assert!(config.logger.enabled);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_disabled_logger_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [logger]
            enabled = false
            log_level = "none"
            "#,
        )
        .unwrap();

        assert!(!config.logger.enabled);
        assert_eq!(config.logger.log_level, LogLevel::None);
    }
}
