//! Performance benchmarks for detection ingest
//!
//! Measures normalization of raw payloads and the full batch path through
//! the dashboard (ring insert, counters, frame view).
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gcs::adapters::mock::MemoryCounterStore;
use gcs::engine::{normalize, normalize_all, Dashboard};
use gcs::startup::DashboardConfig;
use gcs::websocket::{PushEvent, TargetBatch, TransportEvent};
use serde_json::{json, Value};
use tokio::time::Instant;

/// Detections cycling through every known category
fn generate_detections(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| match i % 3 {
            0 => json!({
                "type": "aruco",
                "ts": 1_700_000_000 + i as i64,
                "details": {"id": i, "position": [0.1, 0.2, 1.5], "rotation": [0, 90, 180]}
            }),
            1 => json!({
                "type": "gauge",
                "ts": 1_700_000_000 + i as i64,
                "details": {"reading_bar": 2.4, "confidence": 0.87}
            }),
            _ => json!({
                "target_type": "valve",
                "ts": format!("{}", (1_700_000_000 + i as i64) * 1000),
                "details": "{\"state\": \"open\", \"confidence\": 0.91}"
            }),
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [1, 10, 50, 200].iter() {
        let payload = Value::Array(generate_detections(*size));
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_detections", size)),
            &payload,
            |b, payload| {
                b.iter(|| black_box(normalize_all(black_box(payload))));
            },
        );
    }

    group.bench_function("single_malformed", |b| {
        let payload = json!({"type": 7, "ts": "yesterday", "details": [1, 2]});
        b.iter(|| black_box(normalize(black_box(&payload))));
    });

    group.finish();
}

fn bench_batch_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_ingest");

    for size in [3, 50, 200].iter() {
        let detections = generate_detections(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_detections", size)),
            &detections,
            |b, detections| {
                b.iter(|| {
                    let mut dashboard = Dashboard::new(
                        &DashboardConfig::default(),
                        Box::new(MemoryCounterStore::new()),
                    );
                    dashboard.handle_transport(
                        TransportEvent::Push(PushEvent::TargetBatch(TargetBatch {
                            detections: detections.clone(),
                            count: None,
                        })),
                        Instant::now(),
                    );
                    black_box(dashboard.frame().render())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_batch_ingest);
criterion_main!(benches);
