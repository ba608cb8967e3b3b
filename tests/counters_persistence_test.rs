//! Counters survive a restart through the file store.

mod common;

use gcs::adapters::FileCounterStore;
use gcs::engine::Dashboard;
use gcs::models::SensorSample;
use gcs::startup::DashboardConfig;
use gcs::traits::{CounterSnapshot, CounterStore};
use gcs::websocket::{PushEvent, TransportEvent};
use serde_json::json;
use tempfile::TempDir;
use tokio::time::Instant;

use common::{batch, detection};

fn open(dir: &TempDir) -> Dashboard {
    let config = DashboardConfig::default().with_state_dir(dir.path());
    Dashboard::new(&config, Box::new(FileCounterStore::new(dir.path())))
}

#[test]
fn test_counters_survive_restart() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();

    {
        let mut dash = open(&dir);
        dash.handle_transport(
            TransportEvent::Push(PushEvent::SensorUpdate(SensorSample::from_value(
                &json!({"co_ppm": 1.0}),
            ))),
            now,
        );
        dash.handle_transport(
            batch(vec![
                detection("valve", 1_700_000_001),
                detection("gauge", 1_700_000_002),
            ]),
            now,
        );
    }

    let dash = open(&dir);
    assert_eq!(dash.counters().sensor_samples(), 1);
    assert_eq!(dash.counters().detections(), 2);
    assert_eq!(dash.counters().records_label(), "Records: 3");
}

#[test]
fn test_reset_is_persisted() {
    let dir = TempDir::new().unwrap();
    let store = FileCounterStore::new(dir.path());
    store
        .save(&CounterSnapshot {
            sensor_samples: 7,
            detections: 2,
        })
        .unwrap();

    let mut dash = open(&dir);
    assert_eq!(dash.counters().total(), 9);
    dash.reset_counters();

    assert_eq!(store.load().unwrap(), CounterSnapshot::default());
}

#[test]
fn test_corrupt_file_starts_from_zero() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("counters.json"), "{ nope").unwrap();

    let dash = open(&dir);
    assert_eq!(dash.counters().total(), 0);
}
