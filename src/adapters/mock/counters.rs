//! In-memory counter store for testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::traits::{CounterSnapshot, CounterStore};

/// Counter store backed by shared memory.
///
/// Clones share state, so a test can keep one handle while the dashboard
/// owns the boxed other and inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryCounterStore {
    snapshot: Arc<Mutex<CounterSnapshot>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
    fail_loads: Arc<AtomicBool>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: CounterSnapshot) -> Self {
        let store = Self::default();
        *store.snapshot.lock().unwrap() = snapshot;
        store
    }

    /// Last saved snapshot.
    pub fn current(&self) -> CounterSnapshot {
        *self.snapshot.lock().unwrap()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    fn simulated_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "simulated failure")
    }
}

impl CounterStore for MemoryCounterStore {
    fn load(&self) -> Result<CounterSnapshot, StorageError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                path: "memory".into(),
                source: Self::simulated_error(),
            });
        }
        Ok(self.current())
    }

    fn save(&self, snapshot: &CounterSnapshot) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                path: "memory".into(),
                source: Self::simulated_error(),
            });
        }
        *self.snapshot.lock().unwrap() = *snapshot;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
