//! Observability: `tracing` spans exported to a local OTLP/JSON file.
//!
//! ```text
//! tracing macros → EnvFilter → OpenTelemetryLayer → FileSpanExporter
//!                                                       │
//!                                   otlp::encode_batch ─┤
//!                                                       ▼
//!                                   RotatingFile (carpicker-otlp.json)
//! ```
//!
//! The plugin and worker each call [`init_tracing`] once; both append to the
//! same file. Worker spans are parented to the plugin span that requested
//! them through the trace context carried in `WorkerMessage`.

mod exporter;
mod init;
mod otlp;
mod writer;

pub use init::{init_tracing, TRACE_FILE_NAME};
