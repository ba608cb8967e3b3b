//! Mock implementations for testing.
//!
//! Test doubles for every trait in `crate::traits`, so the dashboard can be
//! driven without a ground station, a socket or the file system.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockPushTransport`] - records outbound push messages
//! - [`MemoryCounterStore`] - in-memory counter persistence

pub mod counters;
pub mod http;
pub mod transport;

pub use counters::MemoryCounterStore;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use transport::MockPushTransport;
