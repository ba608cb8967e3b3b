//! gcs - terminal dashboard for a UAV ground control station.
//!
//! The station pushes sensor samples and target detections over a
//! WebSocket and serves history over REST. This crate reconciles both
//! into a live view: detections are batched into frames, kept in a
//! bounded recent list, and counted durably.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod engine;
pub mod error;
pub mod models;
pub mod startup;
pub mod station;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod websocket;
