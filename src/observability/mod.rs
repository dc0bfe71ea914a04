//! OpenTelemetry-based observability with file-based trace export.
//!
//! Distributed tracing infrastructure for the plugin, using OTLP JSON
//! written to a rotating file for offline analysis; the plugin sandbox
//! has no network collector to send spans to.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON file
//! ```
//!
//! Traces land in `~/.local/share/zellij/zest/zest-otlp.json`, rotating at
//! 10MB with 3 backups. The level comes from the `trace_level` plugin
//! configuration (default `"info"`), overridable via `RUST_LOG`.
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`tracer`]: Custom tracer provider with file export
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
