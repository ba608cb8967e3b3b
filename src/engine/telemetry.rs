//! Sensor and throughput panel state.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};

use crate::models::sensor::{format_reading, SensorMetric, SensorSample};
use crate::models::time::format_clock_or_placeholder;
use crate::models::ThroughputStats;

/// Default chart length per metric.
pub const DEFAULT_CHART_POINTS: usize = 100;

/// Latest sensor sample and when it arrived.
#[derive(Debug, Clone, Default)]
pub struct SensorPanel {
    latest: Option<SensorSample>,
    last_update: Option<DateTime<Utc>>,
}

impl SensorPanel {
    /// Live sample; the update time is the local receive time.
    pub fn update(&mut self, sample: SensorSample) {
        self.latest = Some(sample);
        self.last_update = Some(Utc::now());
    }

    /// Stored sample; the update time is the sample's own timestamp.
    pub fn seed(&mut self, sample: SensorSample) {
        self.last_update = sample.captured_at;
        self.latest = Some(sample);
    }

    pub fn latest(&self) -> Option<&SensorSample> {
        self.latest.as_ref()
    }

    /// Panel text for one metric, `--` until a sample has arrived.
    pub fn display(&self, metric: SensorMetric) -> String {
        match &self.latest {
            Some(sample) => sample.display(metric),
            None => format_reading(None, 0),
        }
    }

    pub fn last_update_label(&self) -> String {
        format!("Last update: {}", format_clock_or_placeholder(self.last_update))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Bounded per-metric chart series.
#[derive(Debug, Clone)]
pub struct SensorSeries {
    capacity: usize,
    points: HashMap<SensorMetric, VecDeque<f64>>,
}

impl Default for SensorSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_POINTS)
    }
}

impl SensorSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            points: HashMap::new(),
        }
    }

    /// Append the metrics present in `sample`; missing ones are skipped.
    pub fn push(&mut self, sample: &SensorSample) {
        for metric in SensorMetric::ALL {
            let Some(value) = sample.get(metric).filter(|v| v.is_finite()) else {
                continue;
            };
            let series = self.points.entry(metric).or_default();
            series.push_back(value);
            while series.len() > self.capacity {
                series.pop_front();
            }
        }
    }

    /// Replace every series with chronological history.
    pub fn seed<'a, I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = &'a SensorSample>,
    {
        self.points.clear();
        for sample in samples {
            self.push(sample);
        }
    }

    pub fn values(&self, metric: SensorMetric) -> Vec<f64> {
        self.points
            .get(&metric)
            .map(|series| series.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, metric: SensorMetric) -> usize {
        self.points.get(&metric).map_or(0, VecDeque::len)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThroughputPanel {
    latest: Option<ThroughputStats>,
}

impl ThroughputPanel {
    pub fn update(&mut self, stats: ThroughputStats) {
        self.latest = Some(stats);
    }

    pub fn aqsa_label(&self) -> String {
        rate(self.latest.as_ref().and_then(|s| s.aqsa_kbps))
    }

    pub fn taip_label(&self) -> String {
        rate(self.latest.as_ref().and_then(|s| s.taip_kbps))
    }

    pub fn updated_label(&self) -> String {
        format!(
            "Updated: {}",
            format_clock_or_placeholder(self.latest.as_ref().and_then(|s| s.measured_at))
        )
    }
}

fn rate(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}", v),
        _ => format_reading(None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(co: f64) -> SensorSample {
        SensorSample::from_value(&json!({"co_ppm": co, "temp_c": 20.0}))
    }

    #[test]
    fn test_series_is_bounded() {
        let mut series = SensorSeries::new(3);
        for i in 0..5 {
            series.push(&sample(i as f64));
        }
        assert_eq!(series.values(SensorMetric::Co), vec![2.0, 3.0, 4.0]);
        assert_eq!(series.len(SensorMetric::Humidity), 0);
    }

    #[test]
    fn test_seed_replaces_history() {
        let mut series = SensorSeries::default();
        series.push(&sample(9.0));
        let history = vec![sample(1.0), sample(2.0)];
        series.seed(&history);
        assert_eq!(series.values(SensorMetric::Co), vec![1.0, 2.0]);
    }

    #[test]
    fn test_sensor_panel_placeholders() {
        let mut panel = SensorPanel::default();
        assert_eq!(panel.display(SensorMetric::Co), "--");
        assert_eq!(panel.last_update_label(), "Last update: --:--:--");

        panel.update(sample(1.234));
        assert_eq!(panel.display(SensorMetric::Co), "1.23");
        assert_eq!(panel.display(SensorMetric::Pressure), "--");
        assert_ne!(panel.last_update_label(), "Last update: --:--:--");
    }

    #[test]
    fn test_throughput_labels() {
        let mut panel = ThroughputPanel::default();
        assert_eq!(panel.aqsa_label(), "--");
        assert_eq!(panel.updated_label(), "Updated: --:--:--");

        panel.update(ThroughputStats::from_value(&json!({"aqsa_kbps": 1.5, "ts": 1_700_000_000})));
        assert_eq!(panel.aqsa_label(), "1.5");
        assert_eq!(panel.taip_label(), "--");
        assert!(!panel.updated_label().contains("--"));
    }
}
