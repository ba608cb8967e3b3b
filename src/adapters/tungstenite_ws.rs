//! Tungstenite-based push transport adapter.
//!
//! Wraps [`WsClient`] so the app loop can hold the outbound half behind the
//! [`PushTransport`] trait while inbound events arrive on the receiver
//! returned by [`TungstenitePushTransport::spawn`].

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::traits::PushTransport;
use crate::websocket::{
    TransportEvent, WsClient, WsClientConfig, WsError, WsOutgoingMessage,
};

/// Push transport using tokio-tungstenite.
///
/// # Example
///
/// ```ignore
/// use gcs::adapters::TungstenitePushTransport;
/// use gcs::websocket::WsClientConfig;
///
/// let (transport, mut events) = TungstenitePushTransport::spawn(WsClientConfig::default());
/// while let Some(event) = events.recv().await {
///     // feed the dashboard
/// }
/// ```
pub struct TungstenitePushTransport {
    client: WsClient,
}

impl TungstenitePushTransport {
    /// Start the background connection loop.
    pub fn spawn(config: WsClientConfig) -> (Self, mpsc::Receiver<TransportEvent>) {
        let (client, events) = WsClient::spawn(config);
        (Self { client }, events)
    }
}

#[async_trait]
impl PushTransport for TungstenitePushTransport {
    async fn send(&self, msg: WsOutgoingMessage) -> Result<(), WsError> {
        self.client.send(msg).await
    }

    fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    fn shutdown(&self) {
        self.client.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_config() -> WsClientConfig {
        WsClientConfig {
            url: "ws://127.0.0.1:1/stream".to_string(),
            reconnect_delay: Duration::from_millis(5),
            max_reconnect_delay: Duration::from_millis(10),
            max_reconnect_attempts: 1,
            connect_timeout: Duration::from_millis(200),
        }
    }

    #[tokio::test]
    async fn test_send_while_disconnected_fails() {
        let (transport, _events) = TungstenitePushTransport::spawn(unreachable_config());
        assert!(!transport.is_connected());

        let result = transport.send(WsOutgoingMessage::Ping).await;
        assert!(matches!(result, Err(WsError::Disconnected)));
        transport.shutdown();
    }
}
