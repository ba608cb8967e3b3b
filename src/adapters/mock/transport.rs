//! Mock push transport for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::traits::PushTransport;
use crate::websocket::{WsError, WsOutgoingMessage};

/// Push transport that records what was sent.
///
/// Starts connected; tests flip the flag with [`MockPushTransport::set_connected`]
/// to exercise the disconnected paths.
#[derive(Debug, Clone)]
pub struct MockPushTransport {
    sent: Arc<Mutex<Vec<WsOutgoingMessage>>>,
    connected: Arc<AtomicBool>,
    shut_down: Arc<AtomicBool>,
}

impl MockPushTransport {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            connected: Arc::new(AtomicBool::new(true)),
            shut_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<WsOutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn was_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

impl Default for MockPushTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushTransport for MockPushTransport {
    async fn send(&self, msg: WsOutgoingMessage) -> Result<(), WsError> {
        if !self.is_connected() {
            return Err(WsError::Disconnected);
        }
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst) && !self.was_shut_down()
    }

    fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_while_connected() {
        let transport = MockPushTransport::new();
        transport.send(WsOutgoingMessage::Ping).await.unwrap();
        assert_eq!(transport.sent_messages().len(), 1);

        transport.set_connected(false);
        assert!(transport.send(WsOutgoingMessage::Ping).await.is_err());
        assert_eq!(transport.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_disconnects() {
        let transport = MockPushTransport::new();
        transport.shutdown();
        assert!(transport.was_shut_down());
        assert!(!transport.is_connected());
    }
}
