//! Environmental sensor samples.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::time::parse_timestamp;

/// Display sentinel for a missing reading.
pub const MISSING_VALUE: &str = "--";

/// One of the seven measured quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorMetric {
    Co,
    No2,
    Nh3,
    Light,
    Temperature,
    Pressure,
    Humidity,
}

impl SensorMetric {
    /// All metrics in panel order.
    pub const ALL: [SensorMetric; 7] = [
        SensorMetric::Co,
        SensorMetric::No2,
        SensorMetric::Nh3,
        SensorMetric::Temperature,
        SensorMetric::Pressure,
        SensorMetric::Humidity,
        SensorMetric::Light,
    ];

    /// Field name in sensor payloads.
    pub fn key(&self) -> &'static str {
        match self {
            SensorMetric::Co => "co_ppm",
            SensorMetric::No2 => "no2_ppm",
            SensorMetric::Nh3 => "nh3_ppm",
            SensorMetric::Light => "light_lux",
            SensorMetric::Temperature => "temp_c",
            SensorMetric::Pressure => "pressure_hpa",
            SensorMetric::Humidity => "humidity_pct",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensorMetric::Co => "CO",
            SensorMetric::No2 => "NO₂",
            SensorMetric::Nh3 => "NH₃",
            SensorMetric::Light => "Light",
            SensorMetric::Temperature => "Temperature",
            SensorMetric::Pressure => "Pressure",
            SensorMetric::Humidity => "Humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorMetric::Co | SensorMetric::No2 | SensorMetric::Nh3 => "ppm",
            SensorMetric::Light => "lux",
            SensorMetric::Temperature => "°C",
            SensorMetric::Pressure => "hPa",
            SensorMetric::Humidity => "%",
        }
    }

    /// Decimal places used on the panel.
    pub fn decimals(&self) -> usize {
        match self {
            SensorMetric::Co | SensorMetric::No2 | SensorMetric::Nh3 => 2,
            SensorMetric::Light => 0,
            SensorMetric::Temperature | SensorMetric::Pressure | SensorMetric::Humidity => 1,
        }
    }
}

/// One sensor reading set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorSample {
    pub captured_at: Option<DateTime<Utc>>,
    pub co_ppm: Option<f64>,
    pub no2_ppm: Option<f64>,
    pub nh3_ppm: Option<f64>,
    pub light_lux: Option<f64>,
    pub temp_c: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub source: Option<String>,
}

impl SensorSample {
    /// Build a sample from an arbitrary JSON payload.
    ///
    /// Numeric strings are accepted; anything else non-numeric is treated as
    /// absent rather than failing the whole sample.
    pub fn from_value(value: &Value) -> Self {
        let number = |key: &str| value.get(key).and_then(lenient_f64);
        Self {
            captured_at: value.get("ts").and_then(parse_timestamp),
            co_ppm: number("co_ppm"),
            no2_ppm: number("no2_ppm"),
            nh3_ppm: number("nh3_ppm"),
            light_lux: number("light_lux"),
            temp_c: number("temp_c"),
            pressure_hpa: number("pressure_hpa"),
            humidity_pct: number("humidity_pct"),
            source: value
                .get("source")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    pub fn get(&self, metric: SensorMetric) -> Option<f64> {
        match metric {
            SensorMetric::Co => self.co_ppm,
            SensorMetric::No2 => self.no2_ppm,
            SensorMetric::Nh3 => self.nh3_ppm,
            SensorMetric::Light => self.light_lux,
            SensorMetric::Temperature => self.temp_c,
            SensorMetric::Pressure => self.pressure_hpa,
            SensorMetric::Humidity => self.humidity_pct,
        }
    }

    /// Panel text for one metric, `--` when absent.
    pub fn display(&self, metric: SensorMetric) -> String {
        format_reading(self.get(metric), metric.decimals())
    }

    /// One-line summary for the activity log.
    pub fn log_summary(&self) -> String {
        format!(
            "Sensor data received: CO={}ppm, Temp={}°C, Humidity={}%",
            format_reading(self.co_ppm, 3),
            format_reading(self.temp_c, 2),
            format_reading(self.humidity_pct, 2)
        )
    }

    pub fn is_empty(&self) -> bool {
        SensorMetric::ALL.iter().all(|m| self.get(*m).is_none())
    }
}

/// Format a reading with fixed decimals, `--` when absent.
pub fn format_reading(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => MISSING_VALUE.to_string(),
    }
}

/// Number or numeric string.
pub(crate) fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
