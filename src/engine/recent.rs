//! Bounded recent-detection history.

use std::collections::VecDeque;
use uuid::Uuid;

use crate::models::DetectionEvent;

/// Default ring bound.
pub const DEFAULT_CAPACITY: usize = 50;

/// Insertion discipline of a single [`RecentRing::push`].
///
/// Live single detections arrive newest-first and are prepended; history
/// and batch loads arrive oldest-first and are appended. Overflow is always
/// trimmed from the opposite end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    Prepend,
    Append,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentEntry {
    pub id: Uuid,
    pub event: DetectionEvent,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct RecentRing {
    entries: VecDeque<RecentEntry>,
    capacity: usize,
}

impl Default for RecentRing {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RecentRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert an event. Returns the new entry id, or `None` if the event is
    /// a live-feed ping or an observation the ring already holds.
    pub fn push(&mut self, event: DetectionEvent, insert: Insert) -> Option<Uuid> {
        if event.category.is_live_data() || self.contains(&event) {
            return None;
        }

        let entry = RecentEntry {
            id: Uuid::new_v4(),
            event,
            active: false,
        };
        let id = entry.id;

        match insert {
            Insert::Prepend => {
                self.entries.push_front(entry);
                self.entries.truncate(self.capacity);
            }
            Insert::Append => {
                self.entries.push_back(entry);
                while self.entries.len() > self.capacity {
                    self.entries.pop_front();
                }
            }
        }

        Some(id)
    }

    /// Append several events in order. Returns how many were accepted.
    pub fn extend<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = DetectionEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| self.push(event, Insert::Append))
            .count()
    }

    /// Replace the ring with a history snapshot, in the order given.
    ///
    /// Live-feed pings and duplicates are dropped. If the snapshot exceeds
    /// the bound, the entries with the oldest capture time are left out.
    pub fn load_historical(&mut self, events: Vec<DetectionEvent>) -> usize {
        self.entries.clear();

        let mut kept: Vec<DetectionEvent> = Vec::with_capacity(events.len());
        for event in events {
            if event.category.is_live_data() || kept.iter().any(|k| k.same_observation(&event)) {
                continue;
            }
            kept.push(event);
        }

        if kept.len() > self.capacity {
            let mut newest: Vec<usize> = (0..kept.len()).collect();
            newest.sort_by(|a, b| kept[*b].captured_at.cmp(&kept[*a].captured_at));
            newest.truncate(self.capacity);
            newest.sort_unstable();
            let mut index = 0;
            kept.retain(|_| {
                let keep = newest.binary_search(&index).is_ok();
                index += 1;
                keep
            });
        }

        self.extend(kept)
    }

    /// Mark one entry active, clearing any other. Unknown ids change nothing.
    pub fn select(&mut self, id: Uuid) -> Option<&DetectionEvent> {
        let position = self.position(id)?;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.active = index == position;
        }
        self.entries.get(position).map(|entry| &entry.event)
    }

    pub fn clear_selection(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.active = false;
        }
    }

    pub fn selected(&self) -> Option<&RecentEntry> {
        self.entries.iter().find(|entry| entry.active)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&RecentEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn contains(&self, event: &DetectionEvent) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.event.same_observation(event))
    }
}
