//! OpenTelemetry-based observability with file-based trace export.
//!
//! `tracing` spans and events from every layer are bridged into OpenTelemetry
//! and written as OTLP JSON lines, since a Zellij plugin has no network
//! collector to talk to.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → JsonLinesExporter → RotatingFile
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: `~/.local/share/zellij/roster/roster-otlp.json`
//! - **Rotation**: at 10MB, keeping `.1` to `.3` backups
//! - **Level Control**: `trace_level` plugin option (default `"info"`), any
//!   `EnvFilter` directive such as `"roster=debug"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: OTLP JSON encoding and the span exporter
//! - [`rotating`]: Size-rotated line file

mod exporter;
mod init;
mod rotating;

pub use init::{init_tracing, TRACE_FILE_NAME};
