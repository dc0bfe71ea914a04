//! Custom OpenTelemetry tracer provider with file-based span export.
//!
//! Implements a `SpanExporter` that writes spans to a rotating JSON file
//! instead of sending them over the network, enabling offline trace
//! analysis inside the plugin sandbox.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// File-based OpenTelemetry span exporter.
///
/// Formats batches as OTLP JSON documents and appends them line-by-line to
/// a rotating file.
struct FileSpanExporter {
    /// File writer with rotation support.
    writer: FileWriter,
    /// OTLP JSON formatter.
    formatter: SpanFormatter,
    /// Shutdown flag (prevents export after shutdown).
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates a new file-based span exporter.
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    /// Exports a batch of spans to the file as one OTLP JSON line.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let json = self.formatter.format_batch(&batch);
        let json_string = json.to_string();

        match self.writer.write_line(&json_string) {
            Ok(()) => Box::pin(std::future::ready(Ok(()))),
            Err(e) => Box::pin(std::future::ready(Err(TraceError::from(e.to_string())))),
        }
    }

    /// Sets the shutdown flag; the file itself is closed on drop.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// No-op: the resource is fixed at construction.
    fn set_resource(&mut self, res: &Resource) {
        let _ = res;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a tracer provider with file-based export.
///
/// The provider uses a simple (immediate, non-batched) export strategy so
/// spans reach the file even when the plugin is torn down abruptly.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
