//! Tracer provider backed by a file span exporter.
//!
//! Spans never leave the machine: each batch is formatted as OTLP JSON and
//! appended to the rotating trace file in the plugin data directory.

use super::file_writer::RotatingFile;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

struct FileSpanExporter {
    file: RotatingFile,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let line = self.formatter.format_batch(&batch).to_string();
        let result = self
            .file
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// The resource is fixed at construction.
    fn set_resource(&mut self, _res: &Resource) {}
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a provider that exports every finished span immediately to
/// `file_path`, tagged with `scope`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(file_path),
        formatter: SpanFormatter::new(resource.clone(), scope),
        is_shutdown: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rentdesk-otlp.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "RentDesk")]);
        let provider = create_tracer_provider(path.clone(), resource, "RentDesk");

        provider.tracer("RentDesk").in_span("rent", |_cx| {});

        let contents = std::fs::read_to_string(path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"], "rent");
    }
}
