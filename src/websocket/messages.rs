//! Push-channel wire format.
//!
//! Every text frame is a JSON envelope `{"event": "<name>", "data": <payload>}`.
//! Detection payloads are kept as raw JSON here and handed to
//! [`crate::engine::normalizer`]; this module only knows event names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::WsError;
use crate::engine::connection::LifecycleEvent;
use crate::models::{SensorSample, ThroughputStats};

#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Payload of a `target_batch` push.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetBatch {
    pub detections: Vec<Value>,
    /// Count announced by the sender; informational only.
    pub count: Option<u64>,
}

/// A data event pushed by the ground station.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    SensorUpdate(SensorSample),
    /// Legacy single-detection path.
    TargetDetected(Value),
    /// Current single-detection path, coalesced by the batching window.
    RecentDetection(Value),
    TargetBatch(TargetBatch),
    ThroughputUpdate(ThroughputStats),
    /// Server hello and keepalive replies. Carries the event name.
    Control(String),
}

impl PushEvent {
    /// Parse one text frame.
    pub fn parse(text: &str) -> Result<Self, WsError> {
        let envelope: Envelope =
            serde_json::from_str(text).map_err(|e| WsError::ParseError(e.to_string()))?;
        Self::from_envelope(envelope.event, envelope.data)
    }

    fn from_envelope(event: String, data: Value) -> Result<Self, WsError> {
        let parsed = match event.as_str() {
            "sensor_update" => PushEvent::SensorUpdate(SensorSample::from_value(&data)),
            "target_detected" => PushEvent::TargetDetected(data),
            "recent_detection" => PushEvent::RecentDetection(data),
            "target_batch" => PushEvent::TargetBatch(TargetBatch {
                detections: data
                    .get("detections")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                count: data.get("count").and_then(Value::as_u64),
            }),
            "throughput_update" => PushEvent::ThroughputUpdate(ThroughputStats::from_value(&data)),
            "connected" | "pong" => PushEvent::Control(event),
            _ => return Err(WsError::UnknownEvent(event)),
        };
        Ok(parsed)
    }

    /// Wire name of the event.
    pub fn name(&self) -> &str {
        match self {
            PushEvent::SensorUpdate(_) => "sensor_update",
            PushEvent::TargetDetected(_) => "target_detected",
            PushEvent::RecentDetection(_) => "recent_detection",
            PushEvent::TargetBatch(_) => "target_batch",
            PushEvent::ThroughputUpdate(_) => "throughput_update",
            PushEvent::Control(name) => name,
        }
    }
}

/// Everything the push client reports to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Lifecycle(LifecycleEvent),
    Push(PushEvent),
}

/// Frames sent to the ground station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WsOutgoingMessage {
    /// Keepalive; no reply is awaited.
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sensor_update() {
        let event = PushEvent::parse(
            r#"{"event": "sensor_update", "data": {"co_ppm": 1.5, "temp_c": 21.0}}"#,
        )
        .unwrap();
        match event {
            PushEvent::SensorUpdate(sample) => {
                assert_eq!(sample.co_ppm, Some(1.5));
                assert_eq!(sample.temp_c, Some(21.0));
            }
            other => panic!("Expected SensorUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_target_batch() {
        let event = PushEvent::parse(
            r#"{"event": "target_batch", "data": {"detections": [{"type": "valve"}, {"type": "gauge"}], "count": 2}}"#,
        )
        .unwrap();
        match event {
            PushEvent::TargetBatch(batch) => {
                assert_eq!(batch.detections.len(), 2);
                assert_eq!(batch.count, Some(2));
            }
            other => panic!("Expected TargetBatch, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_without_detections_is_empty() {
        let event = PushEvent::parse(r#"{"event": "target_batch", "data": {}}"#).unwrap();
        assert_eq!(
            event,
            PushEvent::TargetBatch(TargetBatch {
                detections: Vec::new(),
                count: None
            })
        );
    }

    #[test]
    fn test_parse_detection_keeps_raw_payload() {
        let event = PushEvent::parse(
            r#"{"event": "recent_detection", "data": {"type": "valve", "ts": 1700000000}}"#,
        )
        .unwrap();
        assert_eq!(event.name(), "recent_detection");
        match event {
            PushEvent::RecentDetection(raw) => assert_eq!(raw["type"], "valve"),
            other => panic!("Expected RecentDetection, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_defaults_to_null() {
        let event = PushEvent::parse(r#"{"event": "pong"}"#).unwrap();
        assert_eq!(event, PushEvent::Control("pong".to_string()));
    }

    #[test]
    fn test_unknown_event() {
        let err = PushEvent::parse(r#"{"event": "telemetry_v9", "data": 1}"#).unwrap_err();
        assert!(matches!(err, WsError::UnknownEvent(name) if name == "telemetry_v9"));
    }

    #[test]
    fn test_malformed_frame() {
        assert!(matches!(
            PushEvent::parse("not json"),
            Err(WsError::ParseError(_))
        ));
        assert!(matches!(
            PushEvent::parse(r#"{"data": {}}"#),
            Err(WsError::ParseError(_))
        ));
    }

    #[test]
    fn test_ping_serialization() {
        let json = serde_json::to_string(&WsOutgoingMessage::Ping).unwrap();
        assert_eq!(json, r#"{"event":"ping"}"#);
    }
}
