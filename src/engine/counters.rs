//! Record counters persisted through a [`CounterStore`].

use crate::error::StorageError;
use crate::traits::{CounterSnapshot, CounterStore};

/// Sensor-sample and detection counters.
///
/// Each change is saved before the method returns. A failed save keeps the
/// in-memory value and hands the error back so the caller can report it.
pub struct Counters {
    snapshot: CounterSnapshot,
    store: Box<dyn CounterStore>,
}

impl std::fmt::Debug for Counters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Counters")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl Counters {
    /// Restore the last saved values. Unreadable state starts from zero.
    pub fn load(store: Box<dyn CounterStore>) -> Self {
        let snapshot = match store.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!("Starting counters from zero: {}", err);
                CounterSnapshot::default()
            }
        };
        Self { snapshot, store }
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        self.snapshot
    }

    pub fn sensor_samples(&self) -> u64 {
        self.snapshot.sensor_samples
    }

    pub fn detections(&self) -> u64 {
        self.snapshot.detections
    }

    pub fn total(&self) -> u64 {
        self.snapshot.sensor_samples + self.snapshot.detections
    }

    /// Header text, e.g. `Records: 12`.
    pub fn records_label(&self) -> String {
        format!("Records: {}", self.total())
    }

    pub fn record_sensor_sample(&mut self) -> Result<(), StorageError> {
        self.snapshot.sensor_samples += 1;
        self.persist()
    }

    /// Count `count` accepted detections with a single save.
    pub fn record_detections(&mut self, count: usize) -> Result<(), StorageError> {
        if count == 0 {
            return Ok(());
        }
        self.snapshot.detections += count as u64;
        self.persist()
    }

    /// Zero both counters.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.snapshot = CounterSnapshot::default();
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(&self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MemoryCounterStore;

    #[test]
    fn test_load_restores_saved_values() {
        let store = MemoryCounterStore::with_snapshot(CounterSnapshot {
            sensor_samples: 4,
            detections: 6,
        });
        let counters = Counters::load(Box::new(store));
        assert_eq!(counters.total(), 10);
        assert_eq!(counters.records_label(), "Records: 10");
    }

    #[test]
    fn test_every_increment_is_saved() {
        let store = MemoryCounterStore::new();
        let mut counters = Counters::load(Box::new(store.clone()));

        counters.record_sensor_sample().unwrap();
        counters.record_detections(3).unwrap();
        counters.record_detections(0).unwrap();

        assert_eq!(store.saves(), 2);
        assert_eq!(
            store.current(),
            CounterSnapshot {
                sensor_samples: 1,
                detections: 3
            }
        );
    }

    #[test]
    fn test_reset_persists_zero() {
        let store = MemoryCounterStore::with_snapshot(CounterSnapshot {
            sensor_samples: 2,
            detections: 2,
        });
        let mut counters = Counters::load(Box::new(store.clone()));
        counters.reset().unwrap();
        assert_eq!(counters.total(), 0);
        assert_eq!(store.current(), CounterSnapshot::default());
    }

    #[test]
    fn test_failed_save_keeps_memory_value() {
        let store = MemoryCounterStore::new();
        store.fail_saves(true);
        let mut counters = Counters::load(Box::new(store.clone()));
        assert!(counters.record_sensor_sample().is_err());
        assert_eq!(counters.sensor_samples(), 1);
    }

    #[test]
    fn test_unreadable_store_starts_at_zero() {
        let store = MemoryCounterStore::new();
        store.fail_loads(true);
        let counters = Counters::load(Box::new(store));
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }
}
