//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! let (dashboard, store) = common::dashboard();
//! ```

#![allow(dead_code)]

use gcs::adapters::mock::{MemoryCounterStore, MockHttpClient};
use gcs::engine::Dashboard;
use gcs::startup::DashboardConfig;
use gcs::station::StationClient;
use gcs::websocket::{PushEvent, TargetBatch, TransportEvent};
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://gcs.test";

/// Dashboard over a shared in-memory counter store.
pub fn dashboard() -> (Dashboard, MemoryCounterStore) {
    let store = MemoryCounterStore::new();
    let dashboard = Dashboard::new(&DashboardConfig::default(), Box::new(store.clone()));
    (dashboard, store)
}

pub fn mock_station() -> (StationClient<MockHttpClient>, MockHttpClient) {
    let http = MockHttpClient::new();
    (StationClient::new(http.clone(), BASE_URL), http)
}

pub fn detection(category: &str, ts: i64) -> Value {
    json!({"type": category, "ts": ts})
}

pub fn recent(value: Value) -> TransportEvent {
    TransportEvent::Push(PushEvent::RecentDetection(value))
}

pub fn batch(detections: Vec<Value>) -> TransportEvent {
    let count = detections.len() as u64;
    TransportEvent::Push(PushEvent::TargetBatch(TargetBatch {
        detections,
        count: Some(count),
    }))
}
