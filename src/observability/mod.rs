//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → rentdesk-otlp.json
//! ```
//!
//! Traces go to `~/.local/share/zellij/rentdesk/rentdesk-otlp.json` as one
//! OTLP JSON document per line. The file rotates at 10 MB and keeps three
//! numbered backups. The filter comes from the `trace_level` plugin option
//! (default `info`).
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file span exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: Size-rotated trace file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
