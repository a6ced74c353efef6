//! Plugin <-> worker message protocol.
//!
//! Messages travel as JSON over Zellij IPC. Requests carry the current trace
//! context so worker spans join the plugin trace that asked for them.

use crate::domain::{AssetOutcome, AssetRequest};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, e.g. before
    /// tracing is initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Requests sent from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Probe and load the preview asset for one car.
    LoadAsset {
        request: AssetRequest,

        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Builds a `LoadAsset` message tagged with the current trace context.
    #[must_use]
    pub fn load_asset(request: AssetRequest) -> Self {
        Self::LoadAsset {
            request,
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadAsset { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// An asset load finished, successfully or not.
    Asset(AssetOutcome),

    /// The request could not be processed at all.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetKey, Item, PreviewSize};

    #[test]
    fn test_load_asset_round_trips_through_json() {
        let message = WorkerMessage::load_asset(AssetRequest {
            key: AssetKey::for_item(&Item::new("Ford", "Mustang")),
            asset_dir: "/host/assets".to_string(),
            size: PreviewSize::default(),
        });
        // No subscriber is installed in unit tests.
        assert!(message.trace_context().is_none());

        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
        let decoded: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, message);
    }
}
