//! Push channel to the ground station.
//!
//! A WebSocket client with a declarative reconnect policy. It parses JSON
//! envelopes into [`PushEvent`]s and reports connection changes as
//! lifecycle events on the same channel.

pub mod client;
pub mod messages;

pub use client::{WsClient, WsClientConfig, WsConnectionState, WsError};
pub use messages::{PushEvent, TargetBatch, TransportEvent, WsOutgoingMessage};
