pub mod detection;
pub mod display;
pub mod frame;
pub mod preview;
pub mod sensor;
pub mod throughput;
pub mod time;

pub use detection::{Category, DetectionAttributes, DetectionEvent};
pub use display::{DisplayCommand, DisplayMode};
pub use frame::Frame;
pub use preview::ImageInfo;
pub use sensor::{format_reading, SensorMetric, SensorSample, MISSING_VALUE};
pub use throughput::ThroughputStats;
pub use time::{format_clock, format_clock_or_placeholder, parse_timestamp, parse_timestamp_str};
