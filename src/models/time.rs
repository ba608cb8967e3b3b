//! Timestamp resolution and display.
//!
//! The ground station emits timestamps in three encodings depending on the
//! path: epoch seconds as a JSON number (live events, `/api/recent-detections`),
//! epoch milliseconds as a string, and ISO-8601 strings (database-backed
//! endpoints, often without an offset).

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Values at or above this magnitude are treated as milliseconds.
///
/// 1e11 seconds is the year 5138; 1e11 milliseconds is March 1973.
const MILLIS_THRESHOLD: f64 = 1e11;

/// Display sentinel for an unresolvable capture time.
pub const UNKNOWN_TIME: &str = "Unknown time";

/// Display sentinel for a missing clock value.
pub const CLOCK_PLACEHOLDER: &str = "--:--:--";

/// Resolve a JSON timestamp. Returns `None` instead of failing.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_epoch),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

/// Resolve a textual timestamp: numeric epoch or ISO-8601.
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(number) = trimmed.parse::<f64>() {
        return from_epoch(number);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Python's isoformat() on naive datetimes: no offset, optional fraction.
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

fn from_epoch(number: f64) -> Option<DateTime<Utc>> {
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    let millis = if number >= MILLIS_THRESHOLD {
        number
    } else {
        number * 1000.0
    };
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Local wall-clock time (`HH:MM:SS`) or [`UNKNOWN_TIME`].
pub fn format_clock(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

/// Like [`format_clock`] but with the short `--:--:--` placeholder.
pub fn format_clock_or_placeholder(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(_) => format_clock(at),
        None => CLOCK_PLACEHOLDER.to_string(),
    }
}
