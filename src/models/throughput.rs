//! Link throughput statistics pushed by the ground station.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::sensor::lenient_f64;
use super::time::parse_timestamp;

/// Rolling throughput of the two uplink streams, in kb/s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThroughputStats {
    /// Air-quality sensor array stream.
    pub aqsa_kbps: Option<f64>,
    /// Target imagery stream.
    pub taip_kbps: Option<f64>,
    pub measured_at: Option<DateTime<Utc>>,
}

impl ThroughputStats {
    pub fn from_value(value: &Value) -> Self {
        Self {
            aqsa_kbps: value.get("aqsa_kbps").and_then(lenient_f64),
            taip_kbps: value.get("taip_kbps").and_then(lenient_f64),
            measured_at: value.get("ts").and_then(parse_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let stats = ThroughputStats::from_value(&json!({
            "aqsa_kbps": 1.5,
            "taip_kbps": 240.25,
            "ts": 1_700_000_000.0
        }));
        assert_eq!(stats.aqsa_kbps, Some(1.5));
        assert_eq!(stats.taip_kbps, Some(240.25));
        assert_eq!(stats.measured_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_fields() {
        let stats = ThroughputStats::from_value(&json!({}));
        assert_eq!(stats, ThroughputStats::default());
    }
}
