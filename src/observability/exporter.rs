//! File-backed OpenTelemetry span exporter.

use super::otlp;
use super::writer::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported batch as one OTLP/JSON line.
#[derive(Debug)]
pub struct FileSpanExporter {
    writer: RotatingFile,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    #[must_use]
    pub const fn new(writer: RotatingFile, resource: Resource) -> Self {
        Self {
            writer,
            resource,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("exporter is shut down"));
        }

        let request = otlp::encode_batch(&self.resource, batch);
        let line = serde_json::to_string(&request).map_err(|e| TraceError::from(e.to_string()))?;
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(std::future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports every finished span synchronously.
///
/// The plugin runs single-threaded in WASM, so there is no batch processor.
#[must_use]
pub fn create_tracer_provider(writer: RotatingFile, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(writer, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::writer::MAX_FILE_SIZE_BYTES;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn test_spans_land_in_file_as_otlp_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "Carpicker")]);
        let provider = create_tracer_provider(RotatingFile::new(path.clone(), MAX_FILE_SIZE_BYTES), resource);

        provider.tracer("test").in_span("load_asset", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let span = &line["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(span["name"], "load_asset");
        assert_eq!(span["parentSpanId"], "");
    }

    #[test]
    fn test_export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("trace.json"), MAX_FILE_SIZE_BYTES);
        let mut exporter = FileSpanExporter::new(writer, Resource::empty());

        exporter.shutdown();
        assert!(exporter.write_batch(&[]).is_err());
    }
}
