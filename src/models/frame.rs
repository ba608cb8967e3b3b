//! A group of detections believed to come from one camera capture.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::detection::{Category, DetectionEvent};

/// Point-in-time grouping of detections.
///
/// Built from events in *arrival* order: `slots` keeps the last arrival per
/// category, `events` holds every event sorted by capture time (stable, so
/// equal timestamps keep arrival order). Unknown capture times sort first.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    events: Vec<DetectionEvent>,
    slots: BTreeMap<Category, DetectionEvent>,
}

impl Frame {
    pub fn from_arrivals(arrivals: Vec<DetectionEvent>) -> Self {
        let mut slots = BTreeMap::new();
        for event in &arrivals {
            slots.insert(event.category.clone(), event.clone());
        }

        let mut events = arrivals;
        events.sort_by_key(|event| event.captured_at);

        Self { events, slots }
    }

    /// Single-item frame, used when an operator selects a history entry.
    pub fn single(event: DetectionEvent) -> Self {
        Self::from_arrivals(vec![event])
    }

    /// Every event in capture order.
    pub fn events(&self) -> &[DetectionEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DetectionEvent> {
        self.events
    }

    /// At most one event per category.
    pub fn slot(&self, category: &Category) -> Option<&DetectionEvent> {
        self.slots.get(category)
    }

    /// Number of distinct categories present.
    pub fn category_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Capture time of the earliest event.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.events.first().and_then(|event| event.captured_at)
    }

    /// Image of the first event in capture order.
    pub fn primary_image(&self) -> Option<&str> {
        self.events
            .first()
            .and_then(|event| event.image_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(secs, 0)
    }

    #[test]
    fn test_events_sorted_by_capture_time() {
        let frame = Frame::from_arrivals(vec![
            DetectionEvent::new(Category::Valve, at(30)),
            DetectionEvent::new(Category::Gauge, at(10)),
            DetectionEvent::new(Category::Aruco, at(20)),
        ]);
        let order: Vec<_> = frame.events().iter().map(|e| e.category.clone()).collect();
        assert_eq!(order, vec![Category::Gauge, Category::Aruco, Category::Valve]);
        assert_eq!(frame.captured_at(), at(10));
        assert_eq!(frame.category_count(), 3);
    }

    #[test]
    fn test_slot_is_last_arrival() {
        let first = DetectionEvent::new(Category::Valve, at(50)).with_image("/first.jpg");
        let second = DetectionEvent::new(Category::Valve, at(40)).with_image("/second.jpg");
        let frame = Frame::from_arrivals(vec![first, second.clone()]);
        assert_eq!(frame.slot(&Category::Valve), Some(&second));
        assert_eq!(frame.category_count(), 1);
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn test_primary_image_follows_capture_order() {
        let frame = Frame::from_arrivals(vec![
            DetectionEvent::new(Category::Valve, at(2)).with_image("/late.jpg"),
            DetectionEvent::new(Category::Gauge, at(1)).with_image("/early.jpg"),
        ]);
        assert_eq!(frame.primary_image(), Some("/early.jpg"));
    }

    #[test]
    fn test_unknown_time_sorts_first() {
        let frame = Frame::from_arrivals(vec![
            DetectionEvent::new(Category::Valve, at(2)),
            DetectionEvent::new(Category::Gauge, None),
        ]);
        assert_eq!(frame.events()[0].category, Category::Gauge);
        assert_eq!(frame.captured_at(), None);
    }
}
