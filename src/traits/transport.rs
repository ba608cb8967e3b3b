//! Push transport trait abstraction.
//!
//! The dashboard only ever *sends* one thing over the push channel (the
//! keepalive ping); everything else flows inbound as [`TransportEvent`]s
//! on the app's message channel.
//!
//! [`TransportEvent`]: crate::websocket::TransportEvent

use async_trait::async_trait;

use crate::websocket::{WsError, WsOutgoingMessage};

/// Trait for the outbound half of the push connection.
///
/// # Example
///
/// ```ignore
/// use gcs::traits::PushTransport;
/// use gcs::websocket::WsOutgoingMessage;
///
/// async fn ping<T: PushTransport>(transport: &T) {
///     if transport.is_connected() {
///         let _ = transport.send(WsOutgoingMessage::Ping).await;
///     }
/// }
/// ```
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Queue a message for the server.
    async fn send(&self, msg: WsOutgoingMessage) -> Result<(), WsError>;

    /// Whether the transport currently reports an open connection.
    fn is_connected(&self) -> bool;

    /// Stop the connection loop, including any pending reconnect cycle.
    fn shutdown(&self);
}
