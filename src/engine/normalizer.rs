//! Raw payload → [`DetectionEvent`].
//!
//! This is the only place that knows about the differing field names used
//! by the live push paths and the history endpoints:
//!
//! | field      | live (`recent_detection`) | legacy / `recent-targets` |
//! |------------|---------------------------|---------------------------|
//! | category   | `type`                    | `target_type`             |
//! | time       | epoch seconds             | ISO-8601 string           |
//! | attributes | `details`                 | `details`                 |
//!
//! Normalization never fails. Malformed fields degrade to `None` and are
//! rendered as sentinels by [`describe`].

use serde_json::{Map, Value};

use crate::models::detection::{Category, DetectionAttributes, DetectionEvent};
use crate::models::sensor::lenient_f64;
use crate::models::time::parse_timestamp;

/// Sentinel for an absent vector or confidence.
pub const NOT_AVAILABLE: &str = "N/A";
/// Sentinel for an absent label.
pub const UNKNOWN: &str = "unknown";
/// Rendered when a payload had no attributes at all.
pub const NO_DETAILS: &str = "No details available";
/// Rendered for an uncategorized detection with an empty attribute object.
pub const NO_ADDITIONAL_DETAILS: &str = "No additional details";

/// Normalize any supported detection payload.
pub fn normalize(raw: &Value) -> DetectionEvent {
    let category = text_field(raw, "type")
        .or_else(|| text_field(raw, "target_type"))
        .map(|tag| Category::from_tag(&tag))
        .unwrap_or_else(|| Category::Other(Category::UNKNOWN_TAG.to_string()));

    let captured_at = raw
        .get("ts")
        .or_else(|| raw.get("timestamp"))
        .and_then(parse_timestamp);

    let attributes = raw
        .get("details")
        .and_then(attribute_object)
        .map(|map| parse_attributes(&map));

    DetectionEvent {
        category,
        captured_at,
        image_url: text_field(raw, "image_url"),
        thumb_url: text_field(raw, "thumb_url"),
        attributes,
    }
}

/// Normalize every element of a JSON array; non-arrays yield nothing.
pub fn normalize_all(raw: &Value) -> Vec<DetectionEvent> {
    raw.as_array()
        .map(|items| items.iter().map(normalize).collect())
        .unwrap_or_default()
}

/// The `details` field is usually an object, but older uploads stored it
/// as serialized JSON text.
fn attribute_object(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

fn parse_attributes(map: &Map<String, Value>) -> DetectionAttributes {
    let label = |key: &str| map.get(key).and_then(display_text);

    DetectionAttributes {
        confidence: map.get("confidence").and_then(lenient_f64),
        state: label("state"),
        reading: label("reading_bar").or_else(|| label("value")),
        unit: label("unit"),
        marker_id: label("id"),
        position: map
            .get("pose")
            .and_then(vector)
            .or_else(|| map.get("tvec").and_then(vector)),
        rotation: map
            .get("rotation")
            .and_then(vector)
            .or_else(|| map.get("rvec").and_then(vector)),
        extra: map
            .iter()
            .filter(|(key, _)| key.as_str() != "confidence")
            .map(|(key, value)| (key.clone(), value_text(value)))
            .collect(),
    }
}

/// Numeric vector; one level of nesting is flattened (`[[x, y, z]]`).
///
/// Any non-numeric element invalidates the whole vector.
fn vector(value: &Value) -> Option<Vec<f64>> {
    let items = value.as_array()?;
    let flat: Vec<&Value> = match items.as_slice() {
        [Value::Array(inner)] => inner.iter().collect(),
        _ => items.iter().collect(),
    };
    if flat.is_empty() {
        return None;
    }
    flat.into_iter().map(Value::as_f64).collect()
}

fn text_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Scalar as display text; `null`, empty strings and containers are absent.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Confidence as a percentage with one decimal, or `N/A`.
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) if value.is_finite() => format!("{:.1}%", value * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Vector as `[x.xxx, y.yyy, ...]`, or `N/A`.
pub fn format_vector(vector: Option<&[f64]>) -> String {
    match vector {
        Some(values) if !values.is_empty() => {
            let parts: Vec<String> = values.iter().map(|v| format!("{:.3}", v)).collect();
            format!("[{}]", parts.join(", "))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// One-line human description of a detection's attributes.
pub fn describe(event: &DetectionEvent) -> String {
    let Some(attributes) = &event.attributes else {
        return NO_DETAILS.to_string();
    };

    match event.category {
        Category::Valve => format!(
            "State: {} | Confidence: {}",
            attributes.state.as_deref().unwrap_or(UNKNOWN),
            format_confidence(attributes.confidence)
        ),
        Category::Gauge => format!(
            "Reading: {} bar | Confidence: {}",
            attributes.reading.as_deref().unwrap_or(UNKNOWN),
            format_confidence(attributes.confidence)
        ),
        Category::Aruco => format!(
            "ID: {} | Position: {} | Rotation: {}",
            attributes.marker_id.as_deref().unwrap_or(UNKNOWN),
            format_vector(attributes.position.as_deref()),
            format_vector(attributes.rotation.as_deref())
        ),
        Category::LiveData | Category::Other(_) => {
            let mut parts = Vec::with_capacity(attributes.extra.len() + 1);
            if let Some(confidence) = attributes.confidence.filter(|c| c.is_finite()) {
                parts.push(format!("Confidence: {}", format_confidence(Some(confidence))));
            }
            parts.extend(
                attributes
                    .extra
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value)),
            );
            if parts.is_empty() {
                NO_ADDITIONAL_DETAILS.to_string()
            } else {
                parts.join(" | ")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_takes_precedence_over_target_type() {
        let event = normalize(&json!({"type": "gauge", "target_type": "valve"}));
        assert_eq!(event.category, Category::Gauge);

        let event = normalize(&json!({"target_type": "valve"}));
        assert_eq!(event.category, Category::Valve);

        let event = normalize(&json!({"type": "", "target_type": "aruco"}));
        assert_eq!(event.category, Category::Aruco);
    }

    #[test]
    fn test_missing_category_is_unknown() {
        let event = normalize(&json!({"ts": 1}));
        assert_eq!(event.category, Category::Other("unknown".to_string()));
        let event = normalize(&json!({"type": 42}));
        assert_eq!(event.category, Category::Other("unknown".to_string()));
    }

    #[test]
    fn test_non_object_payloads_do_not_panic() {
        for raw in [json!(null), json!(3), json!("valve"), json!([1, 2])] {
            let event = normalize(&raw);
            assert!(event.attributes.is_none());
            assert_eq!(describe(&event), NO_DETAILS);
        }
    }

    #[test]
    fn test_valve_description() {
        let event = normalize(&json!({
            "type": "valve",
            "ts": 1_700_000_000,
            "details": {"state": "open", "confidence": 0.92}
        }));
        assert_eq!(describe(&event), "State: open | Confidence: 92.0%");
    }

    #[test]
    fn test_valve_missing_fields() {
        let event = normalize(&json!({"type": "valve", "details": {}}));
        assert_eq!(describe(&event), "State: unknown | Confidence: N/A");
    }

    #[test]
    fn test_zero_confidence_is_reported() {
        let event = normalize(&json!({"type": "valve", "details": {"state": "closed", "confidence": 0}}));
        assert_eq!(describe(&event), "State: closed | Confidence: 0.0%");
    }

    #[test]
    fn test_gauge_reading_fallback() {
        let event = normalize(&json!({"type": "gauge", "details": {"value": 2.5, "confidence": "0.5"}}));
        assert_eq!(describe(&event), "Reading: 2.5 bar | Confidence: 50.0%");

        let event = normalize(&json!({
            "type": "gauge",
            "details": {"reading_bar": "3.1", "value": 9}
        }));
        assert_eq!(describe(&event), "Reading: 3.1 bar | Confidence: N/A");

        let event = normalize(&json!({"type": "gauge", "details": {"confidence": 0.8}}));
        assert_eq!(describe(&event), "Reading: unknown bar | Confidence: 80.0%");
    }

    #[test]
    fn test_aruco_pose_fields() {
        let event = normalize(&json!({
            "type": "aruco",
            "details": {"id": 7, "pose": [0.1, 0.25, 1.0], "rotation": [0, 0, 3.14159]}
        }));
        assert_eq!(
            describe(&event),
            "ID: 7 | Position: [0.100, 0.250, 1.000] | Rotation: [0.000, 0.000, 3.142]"
        );
    }

    #[test]
    fn test_aruco_legacy_vector_names() {
        let event = normalize(&json!({
            "type": "aruco",
            "details": {"id": 0, "tvec": [[1, 2, 3]], "rvec": "bad"}
        }));
        assert_eq!(
            describe(&event),
            "ID: 0 | Position: [1.000, 2.000, 3.000] | Rotation: N/A"
        );
    }

    #[test]
    fn test_aruco_without_vectors() {
        let event = normalize(&json!({"type": "aruco", "details": {}}));
        assert_eq!(describe(&event), "ID: unknown | Position: N/A | Rotation: N/A");

        let event = normalize(&json!({"type": "aruco", "details": {"pose": [1, "x", 2]}}));
        assert_eq!(event.attributes.unwrap().position, None);
    }

    #[test]
    fn test_other_category_description() {
        let event = normalize(&json!({
            "type": "crack",
            "details": {"confidence": 0.5, "length_mm": 12}
        }));
        assert_eq!(describe(&event), "Confidence: 50.0% | length_mm: 12");

        let event = normalize(&json!({"type": "crack", "details": {}}));
        assert_eq!(describe(&event), NO_ADDITIONAL_DETAILS);
    }

    #[test]
    fn test_details_as_json_text() {
        let event = normalize(&json!({
            "target_type": "valve",
            "details": "{\"state\": \"closed\", \"confidence\": 0.5}"
        }));
        assert_eq!(describe(&event), "State: closed | Confidence: 50.0%");

        let event = normalize(&json!({"target_type": "valve", "details": "not json"}));
        assert_eq!(describe(&event), NO_DETAILS);
    }

    #[test]
    fn test_images_and_timestamps() {
        let event = normalize(&json!({
            "type": "valve",
            "ts": "2023-11-14T22:13:20",
            "image_url": "/static/targets/archive/a.jpg",
            "thumb_url": "/static/targets/archive/a_thumb.jpg"
        }));
        assert_eq!(event.captured_at.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(event.list_image(), Some("/static/targets/archive/a_thumb.jpg"));

        let event = normalize(&json!({"type": "valve", "ts": "whenever"}));
        assert!(event.captured_at.is_none());
    }

    #[test]
    fn test_normalize_all() {
        let events = normalize_all(&json!([{"type": "valve"}, {"target_type": "gauge"}]));
        assert_eq!(events.len(), 2);
        assert!(normalize_all(&json!({"type": "valve"})).is_empty());
    }
}
