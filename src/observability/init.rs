//! Tracing subscriber setup.

use super::exporter;
use super::writer::{RotatingFile, MAX_FILE_SIZE_BYTES};
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "carpicker-otlp.json";

/// Default `EnvFilter` directive when `trace_level` is unset.
const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber: `EnvFilter` at `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that writes OTLP/JSON to
/// `~/.local/share/zellij/carpicker/carpicker-otlp.json`.
///
/// Tracing is best effort. If the data directory cannot be created, or a
/// subscriber is already installed, this does nothing.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "Carpicker")]);
    let writer = RotatingFile::new(data_dir.join(TRACE_FILE_NAME), MAX_FILE_SIZE_BYTES);
    let provider = exporter::create_tracer_provider(writer, resource);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer("Carpicker"));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
