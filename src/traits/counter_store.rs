//! Persistence trait for the record counters.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Persisted value of both counters.
///
/// Field names are fixed storage keys; renaming them would orphan the
/// counts saved by earlier sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    #[serde(rename = "sensorUpdateCount", default)]
    pub sensor_samples: u64,
    #[serde(rename = "targetDetectionCount", default)]
    pub detections: u64,
}

/// Durable storage for [`CounterSnapshot`].
///
/// Implementations write synchronously: the counters are persisted on every
/// increment, so a save must be complete when `save` returns.
pub trait CounterStore: Send {
    /// Load the last saved snapshot (zeroes when nothing was saved yet).
    fn load(&self) -> Result<CounterSnapshot, StorageError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &CounterSnapshot) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_fixed_keys() {
        let snapshot = CounterSnapshot {
            sensor_samples: 3,
            detections: 7,
        };
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["sensorUpdateCount"], 3);
        assert_eq!(json["targetDetectionCount"], 7);
    }

    #[test]
    fn test_snapshot_missing_key_defaults_to_zero() {
        let snapshot: CounterSnapshot =
            serde_json::from_str(r#"{"sensorUpdateCount": 12}"#).unwrap();
        assert_eq!(snapshot.sensor_samples, 12);
        assert_eq!(snapshot.detections, 0);
    }
}
