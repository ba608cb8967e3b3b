//! The dashboard state owner.
//!
//! [`Dashboard`] is driven from a single event loop: push events, lifecycle
//! events, timer ticks and REST results are all applied through `&mut self`,
//! so no component needs locking. Work that has to leave the loop (image
//! fetches) is queued as an [`Effect`] and collected with
//! [`Dashboard::take_effects`].

use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::activity_log::{ActivityLog, LogLevel};
use super::batch::{bulk_frame, BatchWindow};
use super::connection::{ConnectionMachine, ConnectionState, LifecycleEvent};
use super::counters::Counters;
use super::frame_view::{FrameViewModel, PreviewSource};
use super::normalizer::{describe, normalize};
use super::recent::{Insert, RecentRing};
use super::telemetry::{SensorPanel, SensorSeries, ThroughputPanel};
use crate::error::{GcsError, StorageError};
use crate::models::{DetectionEvent, DisplayMode, Frame, ImageInfo, SensorSample, ThroughputStats};
use crate::startup::DashboardConfig;
use crate::station::HealthStatus;
use crate::traits::CounterStore;
use crate::websocket::{PushEvent, TargetBatch, TransportEvent};

/// Side effect requested by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch (and decode) the preview image.
    FetchImage(PreviewSource),
}

/// Where a history snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    /// `/api/recent-detections`
    RecentDetections,
    /// `/api/recent-targets`
    RecentTargets,
}

pub struct Dashboard {
    window: BatchWindow,
    frame: FrameViewModel,
    recent: RecentRing,
    connection: ConnectionMachine,
    counters: Counters,
    log: ActivityLog,
    sensors: SensorPanel,
    series: SensorSeries,
    throughput: ThroughputPanel,
    health: Option<HealthStatus>,
    preview_image: Option<ImageInfo>,
    /// Latest live-feed image, refreshed by the poll whatever the preview shows.
    live_image: Option<ImageInfo>,
    clear_in_flight: bool,
    effects: Vec<Effect>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("connection", &self.connection.state())
            .field("recent", &self.recent.len())
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(config: &DashboardConfig, store: Box<dyn CounterStore>) -> Self {
        let mut log = ActivityLog::new(config.log_capacity);
        log.info("UAV GCS Dashboard initialized");

        Self {
            window: BatchWindow::new(config.batch_window),
            frame: FrameViewModel::new(),
            recent: RecentRing::new(config.ring_capacity),
            connection: ConnectionMachine::new(),
            counters: Counters::load(store),
            log,
            sensors: SensorPanel::default(),
            series: SensorSeries::new(config.chart_points),
            throughput: ThroughputPanel::default(),
            health: None,
            preview_image: None,
            live_image: None,
            clear_in_flight: false,
            effects: Vec::new(),
        }
    }

    // ----- accessors -----

    pub fn frame(&self) -> &FrameViewModel {
        &self.frame
    }

    pub fn recent(&self) -> &RecentRing {
        &self.recent
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn sensors(&self) -> &SensorPanel {
        &self.sensors
    }

    pub fn series(&self) -> &SensorSeries {
        &self.series
    }

    pub fn throughput(&self) -> &ThroughputPanel {
        &self.throughput
    }

    pub fn health(&self) -> Option<&HealthStatus> {
        self.health.as_ref()
    }

    pub fn preview_image(&self) -> Option<&ImageInfo> {
        self.preview_image.as_ref()
    }

    pub fn live_image(&self) -> Option<&ImageInfo> {
        self.live_image.as_ref()
    }

    pub fn is_clearing(&self) -> bool {
        self.clear_in_flight
    }

    /// When the event loop must call [`tick`](Self::tick) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.window.deadline()
    }

    /// Drain queued side effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ----- transport -----

    pub fn handle_transport(&mut self, event: TransportEvent, now: Instant) {
        match event {
            TransportEvent::Lifecycle(event) => self.handle_lifecycle(&event),
            TransportEvent::Push(event) => self.handle_push(event, now),
        }
    }

    pub fn handle_lifecycle(&mut self, event: &LifecycleEvent) {
        if let Some(transition) = self.connection.apply(event) {
            self.log.push(transition.level, transition.message);
        }
    }

    pub fn handle_push(&mut self, event: PushEvent, now: Instant) {
        match event {
            PushEvent::SensorUpdate(sample) => self.on_sensor_update(sample),
            PushEvent::TargetDetected(raw) => self.on_target_detected(normalize(&raw)),
            PushEvent::RecentDetection(raw) => self.on_recent_detection(normalize(&raw), now),
            PushEvent::TargetBatch(batch) => self.on_target_batch(batch),
            PushEvent::ThroughputUpdate(stats) => self.throughput.update(stats),
            PushEvent::Control(name) => debug!("Control frame: {}", name),
        }
    }

    /// Flush the batching window if its quiescence period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(frame) = self.window.poll(now) {
            self.apply_live_frame(frame);
        }
    }

    fn on_sensor_update(&mut self, sample: SensorSample) {
        self.log.info(sample.log_summary());
        self.series.push(&sample);
        self.sensors.update(sample);
        let saved = self.counters.record_sensor_sample();
        self.report_storage(saved);
    }

    /// Legacy path: shown and listed immediately, newest first.
    fn on_target_detected(&mut self, event: DetectionEvent) {
        if event.category.is_live_data() {
            self.refresh_live_image();
            return;
        }

        let summary = format!("Target detected: {} - {}", event.category.label(), describe(&event));
        if self.recent.push(event.clone(), Insert::Prepend).is_some() {
            let saved = self.counters.record_detections(1);
            self.report_storage(saved);
        }
        self.log.info(summary);
        self.show_frame(&Frame::single(event));
    }

    fn on_recent_detection(&mut self, event: DetectionEvent, now: Instant) {
        if event.category.is_live_data() {
            self.refresh_live_image();
            return;
        }
        self.window.submit(event, now);
    }

    /// Pre-formed batches skip the window. Anything already buffered is
    /// flushed first so frames are applied in arrival order.
    fn on_target_batch(&mut self, batch: TargetBatch) {
        if let Some(pending) = self.window.flush_now() {
            self.apply_live_frame(pending);
        }

        let mut live_ping = false;
        let events: Vec<DetectionEvent> = batch
            .detections
            .iter()
            .map(normalize)
            .filter(|event| {
                let live = event.category.is_live_data();
                live_ping |= live;
                !live
            })
            .collect();

        match bulk_frame(events) {
            Some(frame) => self.apply_live_frame(frame),
            None if live_ping => self.refresh_live_image(),
            None => {}
        }
    }

    fn apply_live_frame(&mut self, frame: Frame) {
        let accepted = self.recent.extend(frame.events().iter().cloned());
        if accepted > 0 {
            let saved = self.counters.record_detections(accepted);
            self.report_storage(saved);
        }
        self.show_frame(&frame);
    }

    fn show_frame(&mut self, frame: &Frame) {
        self.recent.clear_selection();
        self.frame.apply_frame(frame);
        self.request_preview();
    }

    fn refresh_live_image(&mut self) {
        self.frame.show_live_image();
        self.request_preview();
    }

    fn request_preview(&mut self) {
        self.effects
            .push(Effect::FetchImage(self.frame.preview().clone()));
    }

    fn report_storage(&mut self, result: Result<(), StorageError>) {
        if let Err(err) = result {
            self.log.error(format!("Failed to save counters: {}", err));
        }
    }

    // ----- REST results -----

    pub fn on_health(&mut self, result: Result<HealthStatus, GcsError>) {
        match result {
            Ok(health) if health.is_healthy() => {
                self.log.success(format!(
                    "Ground station healthy: {} v{}",
                    health.service, health.version
                ));
                self.health = Some(health);
            }
            Ok(health) => {
                self.log
                    .warning(format!("Ground station reports status '{}'", health.status));
                self.health = Some(health);
            }
            Err(err) => self
                .log
                .warning(format!("Health check failed: {}", err.user_message())),
        }
    }

    pub fn on_latest_sensor(&mut self, result: Result<Option<SensorSample>, GcsError>) {
        match result {
            Ok(Some(sample)) => {
                self.log.info(format!(
                    "Loaded latest sensor data from database ({})",
                    crate::models::format_clock(sample.captured_at)
                ));
                self.sensors.seed(sample);
            }
            Ok(None) => self.log.info("No sensor data found in database"),
            Err(err) => {
                debug!("latest-sensor failed: {}", err);
                self.log.error("Failed to load latest sensor data from database");
            }
        }
    }

    pub fn on_sensor_history(&mut self, result: Result<Vec<SensorSample>, GcsError>) {
        match result {
            Ok(samples) => {
                self.series.seed(samples.iter());
                debug!("Seeded chart series with {} samples", samples.len());
            }
            Err(err) => self
                .log
                .warning(format!("Failed to load sensor history: {}", err.user_message())),
        }
    }

    pub fn on_throughput(&mut self, result: Result<ThroughputStats, GcsError>) {
        match result {
            Ok(stats) => self.throughput.update(stats),
            Err(err) => debug!("throughput snapshot failed: {}", err),
        }
    }

    /// Apply a history snapshot. Events are expected oldest first.
    pub fn on_recent_history(
        &mut self,
        source: HistorySource,
        result: Result<Vec<DetectionEvent>, GcsError>,
    ) {
        match result {
            // The snapshot replaces the ring even when it is empty.
            Ok(events) => match self.recent.load_historical(events) {
                0 => self.log.info("No target detections found in database"),
                loaded => self.log.info(format!(
                    "Loaded {} recent target detections from database",
                    loaded
                )),
            },
            Err(err) => {
                debug!("{:?} failed: {}", source, err);
                self.log
                    .error("Failed to load recent target detections from database");
            }
        }
    }

    pub fn on_image_loaded(&mut self, source: &PreviewSource, result: Result<ImageInfo, GcsError>) {
        match result {
            Ok(info) => {
                if *source == PreviewSource::Live {
                    self.live_image = Some(info);
                }
                // A stale fetch for a preview that has since changed is not shown.
                if source == self.frame.preview() {
                    self.preview_image = Some(info);
                }
            }
            Err(err) => debug!("Preview image unavailable: {}", err),
        }
    }

    pub fn on_display_mode(&mut self, device_id: &str, mode: DisplayMode, result: Result<(), GcsError>) {
        match result {
            Ok(()) => self.log.success(format!(
                "Device control: Set {} display mode to '{}'",
                device_id.trim(),
                mode
            )),
            Err(GcsError::Network(err)) => self
                .log
                .error(format!("Device control network error: {}", err)),
            Err(GcsError::User(message)) => self.log.error(message),
            Err(err) => self
                .log
                .error(format!("Device control failed: {}", err.user_message())),
        }
    }

    // ----- operator actions -----

    /// Mark a clear-history request as in flight. Returns `false` if one
    /// already is, in which case no request should be sent.
    pub fn begin_clear_history(&mut self) -> bool {
        if self.clear_in_flight {
            return false;
        }
        self.clear_in_flight = true;
        self.log.info("Clearing all history...");
        true
    }

    /// Apply the outcome of `POST /api/clear-history`. Local state is only
    /// reset once the station has confirmed.
    pub fn finish_clear_history(&mut self, result: Result<(), GcsError>) {
        self.clear_in_flight = false;
        match result {
            Ok(()) => {
                self.window.cancel();
                self.recent.clear();
                self.frame.clear();
                self.sensors.clear();
                self.series.clear();
                self.preview_image = None;
                self.live_image = None;
                let saved = self.counters.reset();
                self.report_storage(saved);
                self.log.success(
                    "All history cleared successfully - database, images, and counters reset",
                );
            }
            Err(err) => self
                .log
                .error(format!("Failed to clear history: {}", err.user_message())),
        }
    }

    /// Show a history entry in the frame panel.
    pub fn select_recent(&mut self, id: Uuid) -> bool {
        let Some(event) = self.recent.select(id).cloned() else {
            return false;
        };
        self.frame.apply_frame(&Frame::single(event));
        self.request_preview();
        true
    }

    /// Select by list position (0 = top of the list).
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.recent.get(index).map(|entry| entry.id) {
            Some(id) => self.select_recent(id),
            None => false,
        }
    }

    pub fn live_camera_mode(&mut self) {
        self.recent.clear_selection();
        self.frame.live_camera_mode();
        self.request_preview();
        self.log.info("Switched to live camera view");
    }

    pub fn reset_counters(&mut self) {
        match self.counters.reset() {
            Ok(()) => self.log.info("All counters reset"),
            Err(err) => self.log.error(format!("Failed to reset counters: {}", err)),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log.clear();
    }

    /// Record an operator-facing message.
    pub fn note(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log.push(level, message);
    }
}
