//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - REST calls to the ground station
//! - [`PushTransport`] - outbound half of the push connection
//! - [`CounterStore`] - durable record counters

pub mod counter_store;
pub mod http;
pub mod transport;

pub use counter_store::{CounterSnapshot, CounterStore};
pub use http::{Headers, HttpClient, HttpError, Response};
pub use transport::PushTransport;
