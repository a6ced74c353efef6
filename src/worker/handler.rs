//! Worker-side processing of asset load requests.
//!
//! Runs on the Zellij worker thread so file reads never stall rendering. The
//! Zellij `ZellijWorker` glue lives in the plugin binary; this type only turns
//! a JSON payload into a JSON response.

use crate::domain::error::{CarpickerError, Result};
use crate::domain::{AssetOutcome, AssetRequest};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Asset loading worker.
///
/// Stateless: every request carries the directory to search.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CarpickerWorker {}

impl CarpickerWorker {
    /// Decodes a JSON [`WorkerMessage`], handles it and encodes the response.
    ///
    /// Undecodable payloads produce a [`WorkerResponse::Error`] rather than
    /// silence, so the plugin can log what went wrong.
    ///
    /// # Errors
    ///
    /// Returns [`CarpickerError::Worker`] if the response cannot be serialized.
    pub fn respond(&mut self, payload: &str) -> Result<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("invalid worker message: {e}"),
                }
            }
        };

        serde_json::to_string(&response)
            .map_err(|e| CarpickerError::Worker(format!("failed to serialize worker response: {e}")))
    }

    /// Processes one message under the caller's trace context.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadAsset { request, .. } => {
                WorkerResponse::Asset(Self::load_asset(&request))
            }
        }
    }

    /// Looks for `{key}.{ext}` in the request's directory and reads the first hit.
    fn load_asset(request: &AssetRequest) -> AssetOutcome {
        let dir = Path::new(&request.asset_dir);

        for file_name in request.key.file_names() {
            let path = dir.join(&file_name);
            if !path.is_file() {
                continue;
            }

            return match std::fs::read(&path) {
                Ok(bytes) => {
                    let byte_len = bytes.len() as u64;
                    tracing::debug!(path = %path.display(), byte_len, size = %request.size, "asset loaded");
                    AssetOutcome::Loaded {
                        key: request.key.clone(),
                        file_name,
                        byte_len,
                        size: request.size,
                    }
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "asset read failed");
                    AssetOutcome::Failed {
                        key: request.key.clone(),
                        message: format!("failed to read {file_name}: {e}"),
                    }
                }
            };
        }

        tracing::debug!(key = %request.key, dir = %dir.display(), "asset not found");
        AssetOutcome::Failed {
            key: request.key.clone(),
            message: format!("no image for {} in {}", request.key, dir.display()),
        }
    }

    /// Re-attaches the plugin's span as the remote parent of worker spans.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetKey, Item, PreviewSize};

    fn request_in(dir: &Path, item: &Item) -> AssetRequest {
        AssetRequest {
            key: AssetKey::for_item(item),
            asset_dir: dir.to_string_lossy().to_string(),
            size: PreviewSize::default(),
        }
    }

    #[test]
    fn test_load_asset_finds_png_after_missing_jpg() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toyota-camry.png"), [0_u8; 42]).unwrap();

        let request = request_in(dir.path(), &Item::new("Toyota", "Camry"));
        let response = CarpickerWorker::default().handle_message(WorkerMessage::load_asset(request));

        assert_eq!(
            response,
            WorkerResponse::Asset(AssetOutcome::Loaded {
                key: AssetKey::for_item(&Item::new("Toyota", "Camry")),
                file_name: "toyota-camry.png".to_string(),
                byte_len: 42,
                size: PreviewSize { width: 500, height: 300 },
            })
        );
    }

    #[test]
    fn test_load_asset_missing_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let request = request_in(dir.path(), &Item::new("Ford", "Mustang"));

        let response = CarpickerWorker::default().handle_message(WorkerMessage::load_asset(request));

        match response {
            WorkerResponse::Asset(AssetOutcome::Failed { key, message }) => {
                assert_eq!(key.as_str(), "ford-mustang");
                assert!(message.contains("ford-mustang"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_respond_to_garbage_payload_is_error_response() {
        let json = CarpickerWorker::default().respond("not json").unwrap();
        let response: WorkerResponse = serde_json::from_str(&json).unwrap();
        assert!(matches!(response, WorkerResponse::Error { .. }));
    }
}
