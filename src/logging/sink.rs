//! Logging sink seam.
//!
//! The formatter hands fully assembled lines to a [`LogSink`]; storage,
//! rotation, and shipping stay outside this crate. Tests substitute a
//! recording implementation to assert on emitted records.

use tracing::Level;

/// Destination for formatted log lines.
pub trait LogSink: Send + Sync {
    /// Write one message at the given severity.
    fn write(&self, severity: Level, message: &str);
}

/// Production sink forwarding to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Level, message: &str) {
        // `tracing` macros need a const level, so dispatch explicitly.
        if severity == Level::TRACE {
            tracing::trace!("{message}");
        } else if severity == Level::DEBUG {
            tracing::debug!("{message}");
        } else if severity == Level::INFO {
            tracing::info!("{message}");
        } else if severity == Level::WARN {
            tracing::warn!("{message}");
        } else {
            tracing::error!("{message}");
        }
    }
}
