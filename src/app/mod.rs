//! Application state and the event loop.
//!
//! [`App`] owns the [`Dashboard`] and everything needed to talk to the
//! outside world. Terminal input, push events, timers and finished REST
//! calls all meet in one `tokio::select!`, so dashboard state is only ever
//! touched from this loop.

mod handlers;
mod keys;
mod messages;

pub use keys::InputMode;
pub use messages::AppMessage;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::adapters::ReqwestHttpClient;
use crate::engine::{Dashboard, Effect, PreviewSource};
use crate::models::DisplayMode;
use crate::startup::{load_initial_state, DashboardConfig};
use crate::station::StationClient;
use crate::traits::{CounterStore, HttpClient, PushTransport};
use crate::websocket::{TransportEvent, WsOutgoingMessage};

/// Main application state.
pub struct App<H: HttpClient + Clone + 'static = ReqwestHttpClient> {
    pub dashboard: Dashboard,
    pub config: DashboardConfig,
    /// Device targeted by display control; editable at runtime.
    pub device_id: Option<String>,
    pub mode: InputMode,
    /// Highlighted row of the recent list.
    pub cursor: usize,
    pub should_quit: bool,
    station: StationClient<H>,
    transport: Box<dyn PushTransport>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl<H: HttpClient + Clone + 'static> App<H> {
    pub fn new(
        config: DashboardConfig,
        station: StationClient<H>,
        transport: Box<dyn PushTransport>,
        store: Box<dyn CounterStore>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            dashboard: Dashboard::new(&config, store),
            device_id: config.device_id.clone(),
            config,
            mode: InputMode::Normal,
            cursor: 0,
            should_quit: false,
            station,
            transport,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// Take the receiving end of the message channel. Used by the run
    /// loop, and by tests that drive the app by hand.
    pub fn take_message_rx(&mut self) -> Option<mpsc::UnboundedReceiver<AppMessage>> {
        self.message_rx.take()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Spawn the initial REST snapshot.
    pub fn spawn_initial_load(&self) {
        let station = self.station.clone();
        let config = self.config.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            load_initial_state(&station, &config, &tx).await;
        });
    }

    pub fn spawn_image_fetch(&self, source: PreviewSource) {
        let station = self.station.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = station.fetch_image(&source).await;
            let _ = tx.send(AppMessage::ImageLoaded { source, result });
        });
    }

    /// Ask the station to wipe its history. Local state changes only when
    /// the result comes back successful.
    pub fn spawn_clear_history(&mut self) {
        if !self.dashboard.begin_clear_history() {
            return;
        }
        let station = self.station.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = station.clear_history().await;
            let _ = tx.send(AppMessage::ClearHistoryFinished(result));
        });
    }

    pub fn spawn_display_mode(&self, mode: DisplayMode) {
        let station = self.station.clone();
        let tx = self.message_tx.clone();
        let device_id = self.device_id.clone().unwrap_or_default();
        tokio::spawn(async move {
            let result = station.set_display_mode(&device_id, mode).await;
            let _ = tx.send(AppMessage::DisplayModeFinished {
                device_id,
                mode,
                result,
            });
        });
    }

    /// Run queued engine side effects.
    pub fn dispatch_effects(&mut self) {
        for effect in self.dashboard.take_effects() {
            match effect {
                Effect::FetchImage(source) => self.spawn_image_fetch(source),
            }
        }
    }

    /// Keepalive: sent only while the transport reports a connection.
    pub async fn send_keepalive(&self) {
        if !self.transport.is_connected() {
            return;
        }
        if let Err(err) = self.transport.send(WsOutgoingMessage::Ping).await {
            debug!("Keepalive skipped: {}", err);
        }
    }

    /// Fallback poll of the live image, independent of push events and of
    /// what the preview currently shows.
    pub fn poll_live_image(&self) {
        self.spawn_image_fetch(PreviewSource::Live);
    }

    pub fn handle_transport(&mut self, event: TransportEvent) {
        self.dashboard.handle_transport(event, Instant::now());
        self.clamp_cursor();
    }

    pub(crate) fn clamp_cursor(&mut self) {
        let len = self.dashboard.recent().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Drive the dashboard until the operator quits or the terminal closes.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut transport_rx: mpsc::Receiver<TransportEvent>,
    ) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        let mut message_rx = self
            .take_message_rx()
            .ok_or_else(|| color_eyre::eyre::eyre!("message receiver already taken"))?;
        let mut event_stream = EventStream::new();

        let mut keepalive = tokio::time::interval(self.config.keepalive_interval);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut image_poll = tokio::time::interval(self.config.image_poll_interval);
        image_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Redraw clocks ("Last update") even when nothing arrives.
        let mut redraw = tokio::time::interval(Duration::from_secs(1));

        self.spawn_initial_load();
        info!("Dashboard running against {}", self.station.base_url());

        loop {
            terminal.draw(|f| crate::ui::render(f, self))?;

            let deadline = self.dashboard.next_deadline();
            let batch_timer = async move {
                match deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                event = event_stream.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => self.quit(),
                },
                Some(event) = transport_rx.recv() => self.handle_transport(event),
                Some(message) = message_rx.recv() => self.handle_message(message),
                _ = batch_timer => self.dashboard.tick(Instant::now()),
                _ = keepalive.tick() => self.send_keepalive().await,
                _ = image_poll.tick() => self.poll_live_image(),
                _ = redraw.tick() => {}
            }

            self.dispatch_effects();
            if self.should_quit {
                break;
            }
        }

        self.transport.shutdown();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::mock::{MemoryCounterStore, MockHttpClient, MockPushTransport};

    pub(crate) fn test_app() -> (App<MockHttpClient>, MockHttpClient, MockPushTransport) {
        let http = MockHttpClient::new();
        let transport = MockPushTransport::new();
        let config = DashboardConfig::default().with_base_url("http://gcs.test");
        let station = StationClient::new(http.clone(), config.base_url.clone());
        let app = App::new(
            config,
            station,
            Box::new(transport.clone()),
            Box::new(MemoryCounterStore::new()),
        );
        (app, http, transport)
    }

    #[tokio::test]
    async fn test_keepalive_only_while_connected() {
        let (app, _, transport) = test_app();

        app.send_keepalive().await;
        assert_eq!(transport.sent_messages().len(), 1);

        transport.set_connected(false);
        app.send_keepalive().await;
        assert_eq!(transport.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn test_image_fetch_reports_back() {
        let (mut app, http, _) = test_app();
        http.set_response(
            "http://gcs.test/static/targets/latest.jpg",
            crate::adapters::mock::MockResponse::bytes("broken"),
        );
        let mut rx = app.take_message_rx().unwrap();

        app.poll_live_image();
        match rx.recv().await {
            Some(AppMessage::ImageLoaded { source, result }) => {
                assert_eq!(source, PreviewSource::Live);
                assert!(result.is_err());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_live_poll_runs_while_frame_preview_shown() {
        let (mut app, _, _) = test_app();
        app.dashboard.handle_push(
            crate::websocket::PushEvent::TargetBatch(crate::websocket::TargetBatch {
                detections: vec![serde_json::json!({
                    "type": "gauge",
                    "ts": 1_700_000_001,
                    "image_url": "/static/targets/archive/a.jpg"
                })],
                count: Some(1),
            }),
            Instant::now(),
        );
        assert!(matches!(
            app.dashboard.frame().preview(),
            PreviewSource::Detection(_)
        ));
        let mut rx = app.take_message_rx().unwrap();

        app.poll_live_image();
        match rx.recv().await {
            Some(AppMessage::ImageLoaded { source, .. }) => {
                assert_eq!(source, PreviewSource::Live);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_take_message_rx_once() {
        let (mut app, _, _) = test_app();
        assert!(app.take_message_rx().is_some());
        assert!(app.take_message_rx().is_none());
    }
}
