//! Quiescence-based coalescing of single detections into frames.
//!
//! The ground station pushes one `recent_detection` per category even when
//! all categories came from the same camera frame. [`BatchWindow`] holds
//! them until no new detection has arrived for `window`, then releases
//! them together as one [`Frame`].
//!
//! The window owns no timer task. It exposes a [`deadline`](BatchWindow::deadline)
//! that the event loop sleeps on; every [`submit`](BatchWindow::submit)
//! replaces that deadline, which is what makes it a debounce rather than a
//! throttle.

use std::time::Duration;
use tokio::time::Instant;

use crate::models::{DetectionEvent, Frame};

/// Default quiescence period.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub struct BatchWindow {
    window: Duration,
    pending: Vec<DetectionEvent>,
    deadline: Option<Instant>,
}

impl Default for BatchWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl BatchWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Vec::new(),
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Buffer an event and restart the quiescence timer.
    pub fn submit(&mut self, event: DetectionEvent, now: Instant) {
        self.pending.push(event);
        self.deadline = Some(now + self.window);
    }

    /// When the buffered events should be flushed, if any are buffered.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Flush if the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Frame> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush_now(),
            _ => None,
        }
    }

    /// Flush immediately regardless of the deadline.
    pub fn flush_now(&mut self) -> Option<Frame> {
        self.deadline = None;
        if self.pending.is_empty() {
            return None;
        }
        Some(Frame::from_arrivals(std::mem::take(&mut self.pending)))
    }

    /// Drop buffered events and cancel the deadline.
    pub fn cancel(&mut self) -> usize {
        self.deadline = None;
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.deadline.is_none()
    }
}

/// Pre-formed collections skip the window entirely.
pub fn bulk_frame(events: Vec<DetectionEvent>) -> Option<Frame> {
    if events.is_empty() {
        None
    } else {
        Some(Frame::from_arrivals(events))
    }
}
