use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::messages::{PushEvent, TransportEvent, WsOutgoingMessage};
use crate::engine::connection::LifecycleEvent;

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// WebSocket connection errors
#[derive(Debug, Clone)]
pub enum WsError {
    Disconnected,
    SendFailed(String),
    ParseError(String),
    UnknownEvent(String),
}

impl std::fmt::Display for WsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WsError::Disconnected => write!(f, "Disconnected from server"),
            WsError::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            WsError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            WsError::UnknownEvent(name) => write!(f, "Unknown event: {}", name),
        }
    }
}

impl std::error::Error for WsError {}

/// WebSocket connection state
#[derive(Debug, Clone, PartialEq)]
pub enum WsConnectionState {
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Disconnected,
    /// Reconnect attempts exhausted; the client has stopped.
    Failed,
}

/// Declarative reconnect policy and endpoint.
#[derive(Debug, Clone)]
pub struct WsClientConfig {
    pub url: String,
    /// Delay before the first reconnect attempt; doubles per attempt.
    pub reconnect_delay: Duration,
    pub max_reconnect_delay: Duration,
    pub max_reconnect_attempts: u32,
    pub connect_timeout: Duration,
}

impl Default for WsClientConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:5000/stream".to_string(),
            reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(5),
            max_reconnect_attempts: 5,
            connect_timeout: Duration::from_secs(20),
        }
    }
}

impl WsClientConfig {
    /// Wait before reconnect `attempt` (1-based): 1s, 2s, 4s, ... capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        std::cmp::min(self.reconnect_delay * factor, self.max_reconnect_delay)
    }
}

/// Push-channel client for the ground station stream.
///
/// The connection runs in a background task that owns the socket, retries
/// according to [`WsClientConfig`] and reports both data and lifecycle
/// events on the receiver returned by [`WsClient::spawn`].
pub struct WsClient {
    outgoing_tx: mpsc::Sender<WsOutgoingMessage>,
    state_rx: watch::Receiver<WsConnectionState>,
    shutdown: Arc<AtomicBool>,
}

impl WsClient {
    /// Start connecting. Never fails: an unreachable server is reported as
    /// `ConnectError` followed by the reconnect cycle.
    pub fn spawn(config: WsClientConfig) -> (Self, mpsc::Receiver<TransportEvent>) {
        let (events_tx, events_rx) = mpsc::channel::<TransportEvent>(100);
        let (outgoing_tx, outgoing_rx) = mpsc::channel::<WsOutgoingMessage>(16);
        let (state_tx, state_rx) = watch::channel(WsConnectionState::Connecting);

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            run_connection_loop(config, events_tx, outgoing_rx, state_tx, shutdown_clone).await;
        });

        (
            Self {
                outgoing_tx,
                state_rx,
                shutdown,
            },
            events_rx,
        )
    }

    /// Check if currently connected
    pub fn is_connected(&self) -> bool {
        matches!(*self.state_rx.borrow(), WsConnectionState::Connected)
    }

    /// Get the current connection state
    pub fn connection_state(&self) -> WsConnectionState {
        self.state_rx.borrow().clone()
    }

    /// Queue a frame for the server.
    pub async fn send(&self, msg: WsOutgoingMessage) -> Result<(), WsError> {
        if !self.is_connected() {
            return Err(WsError::Disconnected);
        }
        self.outgoing_tx
            .send(msg)
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    /// Gracefully shutdown the WebSocket connection
    pub fn shutdown(&self) {
        info!("Shutting down push client");
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Why a live connection ended.
enum SessionEnd {
    /// Shutdown requested or the application stopped listening.
    Stopped,
    /// Connection lost; the reconnect cycle should start.
    Lost(String),
}

async fn emit(events_tx: &mpsc::Sender<TransportEvent>, event: LifecycleEvent) -> bool {
    events_tx.send(TransportEvent::Lifecycle(event)).await.is_ok()
}

/// Connect, pump, and reconnect until shutdown or attempts run out.
async fn run_connection_loop(
    config: WsClientConfig,
    events_tx: mpsc::Sender<TransportEvent>,
    mut outgoing_rx: mpsc::Receiver<WsOutgoingMessage>,
    state_tx: watch::Sender<WsConnectionState>,
    shutdown: Arc<AtomicBool>,
) {
    // 0 = initial connect, otherwise the current reconnect attempt.
    let mut attempt: u32 = 0;

    loop {
        if shutdown.load(Ordering::SeqCst) {
            debug!("Shutdown signal received, not reconnecting");
            break;
        }

        if attempt > 0 {
            let _ = state_tx.send(WsConnectionState::Reconnecting { attempt });
            if !emit(&events_tx, LifecycleEvent::Reconnecting { attempt }).await {
                break;
            }
            let wait = config.backoff(attempt);
            info!(
                "Reconnection attempt {} of {}, waiting {:?}",
                attempt, config.max_reconnect_attempts, wait
            );
            tokio::time::sleep(wait).await;
            if shutdown.load(Ordering::SeqCst) {
                debug!("Shutdown requested during backoff");
                break;
            }
        }

        let connecting = connect_async(config.url.as_str());
        let message = match tokio::time::timeout(config.connect_timeout, connecting).await {
            Ok(Ok((socket, _))) => {
                info!("Connected to push stream at {}", config.url);
                let _ = state_tx.send(WsConnectionState::Connected);
                let event = if attempt > 0 {
                    LifecycleEvent::Reconnected { attempt }
                } else {
                    LifecycleEvent::Connected
                };
                if !emit(&events_tx, event).await {
                    break;
                }

                match pump(socket, &events_tx, &mut outgoing_rx, &shutdown).await {
                    SessionEnd::Stopped => break,
                    SessionEnd::Lost(reason) => {
                        warn!("Push stream lost: {}", reason);
                        let _ = state_tx.send(WsConnectionState::Disconnected);
                        if !emit(&events_tx, LifecycleEvent::Disconnected { reason }).await {
                            break;
                        }
                        attempt = 1;
                        continue;
                    }
                }
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!("timed out after {:?}", config.connect_timeout),
        };

        warn!("Connection attempt {} failed: {}", attempt, message);
        let event = if attempt == 0 {
            LifecycleEvent::ConnectError { message }
        } else {
            LifecycleEvent::ReconnectError { message }
        };
        if !emit(&events_tx, event).await {
            break;
        }

        if attempt >= config.max_reconnect_attempts {
            error!(
                "Failed to reconnect after {} attempts, giving up",
                config.max_reconnect_attempts
            );
            let _ = state_tx.send(WsConnectionState::Failed);
            let _ = emit(&events_tx, LifecycleEvent::ReconnectFailed).await;
            return;
        }
        attempt += 1;
    }

    info!("Connection loop ended");
    let _ = state_tx.send(WsConnectionState::Disconnected);
}

/// Forward frames both ways until the connection ends.
async fn pump(
    socket: Socket,
    events_tx: &mpsc::Sender<TransportEvent>,
    outgoing_rx: &mut mpsc::Receiver<WsOutgoingMessage>,
    shutdown: &Arc<AtomicBool>,
) -> SessionEnd {
    let (mut ws_sink, mut ws_stream) = socket.split();

    loop {
        if shutdown.load(Ordering::SeqCst) {
            debug!("Shutdown signal received, closing connection");
            let _ = ws_sink.close().await;
            return SessionEnd::Stopped;
        }

        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => match PushEvent::parse(&text) {
                        Ok(event) => {
                            debug!("Received {}", event.name());
                            if events_tx.send(TransportEvent::Push(event)).await.is_err() {
                                warn!("Event channel closed, shutting down");
                                return SessionEnd::Stopped;
                            }
                        }
                        Err(e) => {
                            // Skip malformed and unknown frames
                            warn!("Skipping frame: {} - {}", e, text);
                        }
                    },
                    Some(Ok(Message::Close(frame))) => {
                        info!("Received close frame from server");
                        let reason = frame
                            .map(|f| f.reason.to_string())
                            .filter(|r| !r.is_empty())
                            .unwrap_or_else(|| "io server disconnect".to_string());
                        return SessionEnd::Lost(reason);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!("Received ping, sending pong");
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(_)) => {
                        // Ignore other message types (Pong, Binary, Frame)
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        return SessionEnd::Lost(e.to_string());
                    }
                    None => {
                        info!("WebSocket stream ended");
                        return SessionEnd::Lost("transport close".to_string());
                    }
                }
            }
            outgoing = outgoing_rx.recv() => {
                match outgoing {
                    Some(msg) => match serde_json::to_string(&msg) {
                        Ok(json) => {
                            debug!("Sending {}", json);
                            if let Err(e) = ws_sink.send(Message::Text(json)).await {
                                error!("Failed to send frame: {}", e);
                            }
                        }
                        Err(e) => error!("Failed to serialize frame: {}", e),
                    },
                    None => {
                        debug!("Client dropped, closing connection");
                        let _ = ws_sink.close().await;
                        return SessionEnd::Stopped;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_error_display() {
        let err = WsError::SendFailed("broken pipe".to_string());
        assert_eq!(err.to_string(), "Send failed: broken pipe");

        let err = WsError::Disconnected;
        assert_eq!(err.to_string(), "Disconnected from server");

        let err = WsError::UnknownEvent("foo".to_string());
        assert_eq!(err.to_string(), "Unknown event: foo");
    }

    #[test]
    fn test_ws_client_config_default() {
        let config = WsClientConfig::default();
        assert_eq!(config.reconnect_delay, Duration::from_secs(1));
        assert_eq!(config.max_reconnect_attempts, 5);
        assert_eq!(config.connect_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_backoff_calculation() {
        let config = WsClientConfig::default();
        assert_eq!(config.backoff(1), Duration::from_secs(1));
        assert_eq!(config.backoff(2), Duration::from_secs(2));
        assert_eq!(config.backoff(3), Duration::from_secs(4));
        // 8s capped at 5s
        assert_eq!(config.backoff(4), Duration::from_secs(5));
        assert_eq!(config.backoff(40), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_lifecycle() {
        let config = WsClientConfig {
            url: "ws://127.0.0.1:59999/stream".to_string(),
            reconnect_delay: Duration::from_millis(1),
            max_reconnect_delay: Duration::from_millis(1),
            max_reconnect_attempts: 1,
            connect_timeout: Duration::from_secs(2),
        };

        let (client, mut events) = WsClient::spawn(config);

        let mut seen = Vec::new();
        while let Some(TransportEvent::Lifecycle(event)) = events.recv().await {
            seen.push(event);
        }

        assert!(matches!(seen[0], LifecycleEvent::ConnectError { .. }));
        assert_eq!(seen[1], LifecycleEvent::Reconnecting { attempt: 1 });
        assert!(matches!(seen[2], LifecycleEvent::ReconnectError { .. }));
        assert_eq!(seen[3], LifecycleEvent::ReconnectFailed);
        assert_eq!(client.connection_state(), WsConnectionState::Failed);
        assert!(!client.is_connected());
        assert!(matches!(
            client.send(WsOutgoingMessage::Ping).await,
            Err(WsError::Disconnected)
        ));
    }
}
