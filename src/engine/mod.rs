//! Real-time reconciliation of pushed events into display state.
//!
//! Data flow:
//!
//! ```text
//! push event ─► normalizer ─┬─► batch window ─► frame view-model
//!                           └─────────────────► recent ring ─► counters
//! lifecycle event ─► connection machine ─► activity log
//! ```
//!
//! [`Dashboard`] owns every component and is the only entry point the app
//! loop uses.

pub mod activity_log;
pub mod batch;
pub mod connection;
pub mod counters;
pub mod dashboard;
pub mod frame_view;
pub mod normalizer;
pub mod recent;
pub mod telemetry;

pub use activity_log::{ActivityLog, LogEntry, LogLevel};
pub use batch::BatchWindow;
pub use connection::{ConnectionMachine, ConnectionState, LifecycleEvent, Transition};
pub use counters::Counters;
pub use dashboard::{Dashboard, Effect, HistorySource};
pub use frame_view::{FrameHeader, FrameViewModel, PreviewSource, RenderedFrame, RenderedSlot, SlotKind};
pub use normalizer::{describe, normalize, normalize_all};
pub use recent::{Insert, RecentEntry, RecentRing};
pub use telemetry::{SensorPanel, SensorSeries, ThroughputPanel};
