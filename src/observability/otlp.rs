//! OTLP/JSON encoding of finished spans.
//!
//! One export batch becomes one `ExportTraceServiceRequest` document, so the
//! trace file is JSON lines that OTLP tooling (e.g. `otel-desktop-viewer`,
//! Jaeger's file import) can read back.

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope name written for every batch.
const SCOPE_NAME: &str = "Carpicker";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: ResourceJson,
    scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
struct ResourceJson {
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<SpanJson>,
}

#[derive(Debug, Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanJson {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<EventJson>,
    links: Vec<LinkJson>,
    status: StatusJson,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventJson {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkJson {
    trace_id: String,
    span_id: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct StatusJson {
    code: u8,
    message: String,
}

#[derive(Debug, PartialEq, Serialize)]
struct Attribute {
    key: String,
    value: AnyValue,
}

/// OTLP `AnyValue`; integers are strings per the OTLP JSON mapping.
#[derive(Debug, PartialEq, Serialize)]
enum AnyValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    String(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(_) => Self::String(value.as_str().into_owned()),
        }
    }
}

/// Encodes one exported batch under the given resource.
#[must_use]
pub fn encode_batch(resource: &Resource, batch: &[SpanData]) -> ExportRequest {
    let attributes = resource
        .iter()
        .map(|(key, value)| Attribute {
            key: key.to_string(),
            value: value.into(),
        })
        .collect();

    ExportRequest {
        resource_spans: vec![ResourceSpans {
            resource: ResourceJson { attributes },
            scope_spans: vec![ScopeSpans {
                scope: Scope { name: SCOPE_NAME },
                spans: batch.iter().map(encode_span).collect(),
            }],
        }],
    }
}

fn encode_span(span: &SpanData) -> SpanJson {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    SpanJson {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id,
        name: span.name.to_string(),
        kind: kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: encode_attributes(&span.attributes),
        events: span
            .events
            .iter()
            .map(|event| EventJson {
                time_unix_nano: unix_nanos(event.timestamp),
                name: event.name.to_string(),
                attributes: encode_attributes(&event.attributes),
            })
            .collect(),
        links: span
            .links
            .iter()
            .map(|link| LinkJson {
                trace_id: format!("{:032x}", link.span_context.trace_id()),
                span_id: format!("{:016x}", link.span_context.span_id()),
                attributes: encode_attributes(&link.attributes),
            })
            .collect(),
        status: encode_status(&span.status),
    }
}

fn encode_attributes(attributes: &[KeyValue]) -> Vec<Attribute> {
    attributes
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: (&kv.value).into(),
        })
        .collect()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn encode_status(status: &Status) -> StatusJson {
    match status {
        Status::Unset => StatusJson {
            code: 0,
            message: String::new(),
        },
        Status::Ok => StatusJson {
            code: 1,
            message: String::new(),
        },
        Status::Error { description } => StatusJson {
            code: 2,
            message: description.to_string(),
        },
    }
}

/// Nanoseconds since the epoch as a decimal string; pre-epoch clocks give `"0"`.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_attribute_values_follow_otlp_json_mapping() {
        let attrs = encode_attributes(&[
            KeyValue::new("byte_len", 42_i64),
            KeyValue::new("key", "toyota-camry"),
            KeyValue::new("loaded", true),
        ]);

        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json[0]["value"]["intValue"], "42");
        assert_eq!(json[1]["value"]["stringValue"], "toyota-camry");
        assert_eq!(json[2]["value"]["boolValue"], true);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(encode_status(&Status::Unset).code, 0);
        assert_eq!(encode_status(&Status::Ok).code, 1);

        let error = encode_status(&Status::error("no image"));
        assert_eq!((error.code, error.message.as_str()), (2, "no image"));
    }

    #[test]
    fn test_empty_batch_keeps_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Carpicker")]);
        let json = serde_json::to_value(encode_batch(&resource, &[])).unwrap();

        let resource_spans = &json["resourceSpans"][0];
        assert_eq!(resource_spans["resource"]["attributes"][0]["key"], "service.name");
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "Carpicker");
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], serde_json::json!([]));
    }

    #[test]
    fn test_unix_nanos() {
        assert_eq!(unix_nanos(UNIX_EPOCH + Duration::from_micros(3)), "3000");
    }
}
