//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TungstenitePushTransport`] - push channel using tokio-tungstenite
//! - [`FileCounterStore`] - JSON file counter persistence
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all adapters:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockPushTransport`] - Captures outbound messages
//! - [`mock::MemoryCounterStore`] - Shared in-memory counters

pub mod file_counters;
pub mod mock;
pub mod reqwest_http;
pub mod tungstenite_ws;

pub use file_counters::FileCounterStore;
pub use mock::{MemoryCounterStore, MockHttpClient, MockPushTransport};
pub use reqwest_http::ReqwestHttpClient;
pub use tungstenite_ws::TungstenitePushTransport;
