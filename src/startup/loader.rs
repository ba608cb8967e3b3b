//! Initial REST snapshot.
//!
//! Runs once in a spawned task. Calls are sequential so the activity log
//! reads in a predictable order; each outcome is handed to the event loop
//! as an [`AppMessage`] and applied there.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::app::AppMessage;
use crate::engine::HistorySource;
use crate::station::StationClient;
use crate::traits::HttpClient;

use super::DashboardConfig;

/// Fetch everything the dashboard shows before the first push arrives.
///
/// Returns early if the receiver is gone (the app is shutting down).
pub async fn load_initial_state<H: HttpClient>(
    station: &StationClient<H>,
    config: &DashboardConfig,
    tx: &UnboundedSender<AppMessage>,
) {
    info!("Loading initial state from {}", station.base_url());

    if tx.send(AppMessage::Health(station.health().await)).is_err() {
        return;
    }
    if tx
        .send(AppMessage::LatestSensor(station.latest_sensor().await))
        .is_err()
    {
        return;
    }
    if tx
        .send(AppMessage::SensorHistory(
            station.sensor_history(config.sensor_history_limit).await,
        ))
        .is_err()
    {
        return;
    }
    if tx
        .send(AppMessage::Throughput(station.throughput().await))
        .is_err()
    {
        return;
    }

    let message = match station.recent_detections(config.recent_limit).await {
        Ok(events) => AppMessage::RecentHistory {
            source: HistorySource::RecentDetections,
            result: Ok(events),
        },
        Err(err) => {
            debug!("recent-detections failed ({}), trying recent-targets", err);
            AppMessage::RecentHistory {
                source: HistorySource::RecentTargets,
                result: station.recent_targets().await,
            }
        }
    };
    let _ = tx.send(message);
}
