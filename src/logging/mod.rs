//! Structured request/response logging.
//!
//! # Data Flow
//! ```text
//! middleware captures snapshots
//!     → level.rs (which fields does the configured level include?)
//!     → formatter.rs (build maps, decode bodies, serialize, assemble line)
//!     → sink.rs (one write at the severity mapped from the level)
//! ```
//!
//! # Design Decisions
//! - Field sets per level live in one ordered table; the superset
//!   invariant between levels is structural, not re-checked per call
//! - The sink is a trait so tests can record writes instead of tracing

pub mod formatter;
pub mod level;
pub mod sink;

pub use level::LogLevel;
pub use sink::{LogSink, TracingSink};
