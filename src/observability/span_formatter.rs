//! OTLP JSON span formatter.
//!
//! Each exported batch becomes one self-contained OTLP/JSON document:
//!
//! ```json
//! {
//!   "resourceSpans": [{
//!     "resource": {"attributes": [{"key": "service.name", "value": {"stringValue": "RentDesk"}}]},
//!     "scopeSpans": [{"scope": {"name": "RentDesk"}, "spans": [...]}]
//!   }]
//! }
//! ```

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub struct SpanFormatter {
    resource: Resource,
    scope: &'static str,
}

/// Nanoseconds since the epoch as a decimal string, as OTLP/JSON expects.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| json!({ "key": k.to_string(), "value": attribute_value(v) }))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans
                }]
            }]
        })
    }
}

fn format_span(span: &SpanData) -> JsonValue {
    let (status_code, status_message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": span_kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": { "code": status_code, "message": status_message },
    })
}

/// OTLP span kind numbering (0 is unspecified).
const fn span_kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.to_string(), "value": attribute_value(&kv.value) }))
        .collect()
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.to_string() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("scope", &self.scope).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_follow_otlp_json() {
        assert_eq!(attribute_value(&Value::I64(42)), json!({ "intValue": "42" }));
        assert_eq!(attribute_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(
            attribute_value(&Value::from("handle_event")),
            json!({ "stringValue": "handle_event" })
        );
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "RentDesk")]);
        let doc = SpanFormatter::new(resource, "RentDesk").format_batch(&[]);

        let scope = &doc["resourceSpans"][0]["scopeSpans"][0];
        assert_eq!(scope["scope"]["name"], "RentDesk");
        assert_eq!(scope["spans"], json!([]));
        let attrs = doc["resourceSpans"][0]["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.iter().any(|attr| attr["value"]["stringValue"] == "RentDesk"));
    }
}
