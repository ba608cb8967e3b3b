//! Messages delivered to the event loop by spawned tasks.

use crate::engine::{HistorySource, PreviewSource};
use crate::error::GcsResult;
use crate::models::{DetectionEvent, DisplayMode, ImageInfo, SensorSample, ThroughputStats};
use crate::station::HealthStatus;

/// Outcome of an asynchronous operation, applied on the loop's turn.
#[derive(Debug)]
pub enum AppMessage {
    /// `GET /health` finished
    Health(GcsResult<HealthStatus>),
    /// `GET /api/latest-sensor` finished
    LatestSensor(GcsResult<Option<SensorSample>>),
    /// `GET /api/sensor-history` finished
    SensorHistory(GcsResult<Vec<SensorSample>>),
    /// `GET /api/telemetry/throughput` finished
    Throughput(GcsResult<ThroughputStats>),
    /// A history snapshot was fetched
    RecentHistory {
        source: HistorySource,
        result: GcsResult<Vec<DetectionEvent>>,
    },
    /// A preview image was fetched and decoded
    ImageLoaded {
        source: PreviewSource,
        result: GcsResult<ImageInfo>,
    },
    /// `POST /api/clear-history` finished
    ClearHistoryFinished(GcsResult<()>),
    /// `POST /api/device/{id}/display` finished
    DisplayModeFinished {
        device_id: String,
        mode: DisplayMode,
        result: GcsResult<()>,
    },
}
