//! Fixed-slot view model of the current frame.

use chrono::{DateTime, Utc};

use super::normalizer::describe;
use crate::models::time::{format_clock_or_placeholder, CLOCK_PLACEHOLDER};
use crate::models::{Category, DetectionEvent, Frame};

/// The known detection categories, one display slot each, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Aruco,
    Gauge,
    Valve,
}

impl SlotKind {
    pub const ALL: [SlotKind; 3] = [SlotKind::Aruco, SlotKind::Gauge, SlotKind::Valve];

    pub fn category(&self) -> Category {
        match self {
            SlotKind::Aruco => Category::Aruco,
            SlotKind::Gauge => Category::Gauge,
            SlotKind::Valve => Category::Valve,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Aruco => "ARUCO",
            SlotKind::Gauge => "GAUGE",
            SlotKind::Valve => "VALVE",
        }
    }

    /// Same label structure as the populated text, with `--` values.
    pub fn placeholder(&self) -> &'static str {
        match self {
            SlotKind::Aruco => "ID: -- | Position: [--, --, --] | Rotation: [--, --, --]",
            SlotKind::Gauge => "Reading: -- bar | Confidence: --%",
            SlotKind::Valve => "State: -- | Confidence: --%",
        }
    }
}

/// What the frame header currently describes.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameHeader {
    /// A detection frame (possibly empty).
    Frame {
        captured_at: Option<DateTime<Utc>>,
        detections: usize,
    },
    /// Unfiltered camera feed requested by the operator.
    Live,
}

impl FrameHeader {
    pub fn time_label(&self) -> String {
        match self {
            FrameHeader::Frame { captured_at, .. } => {
                format!("[{}]", format_clock_or_placeholder(*captured_at))
            }
            FrameHeader::Live => "[LIVE]".to_string(),
        }
    }

    pub fn count_label(&self) -> String {
        match self {
            FrameHeader::Frame { detections, .. } => format!(
                "FRAME ({} detection{})",
                detections,
                if *detections == 1 { "" } else { "s" }
            ),
            FrameHeader::Live => "LIVE CAMERA".to_string(),
        }
    }
}

impl Default for FrameHeader {
    fn default() -> Self {
        FrameHeader::Frame {
            captured_at: None,
            detections: 0,
        }
    }
}

/// Where the preview pane's image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewSource {
    /// The well-known live image path.
    #[default]
    Live,
    /// The archived image of a specific detection.
    Detection(String),
}

/// Fully rendered slot text; stable labels, toggling values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSlot {
    pub kind: SlotKind,
    pub label: &'static str,
    pub details: String,
    pub active: bool,
}

/// Everything the frame panel draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub time: String,
    pub count: String,
    pub slots: Vec<RenderedSlot>,
}

#[derive(Debug, Clone, Default)]
pub struct FrameViewModel {
    slots: [Option<DetectionEvent>; 3],
    header: FrameHeader,
    preview: PreviewSource,
}

impl FrameViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `frame`: known categories fill their slots, the rest become
    /// placeholders. Applying the same frame twice changes nothing.
    pub fn apply_frame(&mut self, frame: &Frame) {
        for (index, kind) in SlotKind::ALL.iter().enumerate() {
            self.slots[index] = frame.slot(&kind.category()).cloned();
        }
        self.header = FrameHeader::Frame {
            captured_at: frame.captured_at(),
            detections: frame.category_count(),
        };
        if let Some(url) = frame.primary_image() {
            self.preview = PreviewSource::Detection(url.to_string());
        }
    }

    /// Switch to the unfiltered camera feed.
    pub fn live_camera_mode(&mut self) {
        self.slots = Default::default();
        self.header = FrameHeader::Live;
        self.preview = PreviewSource::Live;
    }

    /// Point the preview at the live image without touching slots.
    pub fn show_live_image(&mut self) {
        self.preview = PreviewSource::Live;
    }

    /// Back to the initial empty frame.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn slot(&self, kind: SlotKind) -> Option<&DetectionEvent> {
        let index = SlotKind::ALL.iter().position(|k| *k == kind)?;
        self.slots[index].as_ref()
    }

    pub fn active_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    pub fn preview(&self) -> &PreviewSource {
        &self.preview
    }

    pub fn is_live(&self) -> bool {
        matches!(self.header, FrameHeader::Live)
    }

    pub fn render(&self) -> RenderedFrame {
        let slots = SlotKind::ALL
            .iter()
            .zip(self.slots.iter())
            .map(|(kind, slot)| RenderedSlot {
                kind: *kind,
                label: kind.label(),
                details: slot
                    .as_ref()
                    .map(describe)
                    .unwrap_or_else(|| kind.placeholder().to_string()),
                active: slot.is_some(),
            })
            .collect();

        RenderedFrame {
            time: self.header.time_label(),
            count: self.header.count_label(),
            slots,
        }
    }
}

/// Header text used before any frame has been applied.
pub fn empty_header_time() -> String {
    format!("[{}]", CLOCK_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetectionAttributes;

    fn valve_open() -> DetectionEvent {
        DetectionEvent::new(Category::Valve, DateTime::from_timestamp(1_700_000_000, 0))
            .with_image("/static/targets/archive/valve.jpg")
            .with_attributes(DetectionAttributes {
                state: Some("open".to_string()),
                confidence: Some(0.92),
                ..Default::default()
            })
    }

    #[test]
    fn test_initial_render_is_all_placeholders() {
        let view = FrameViewModel::new();
        let rendered = view.render();
        assert_eq!(rendered.time, empty_header_time());
        assert_eq!(rendered.count, "FRAME (0 detections)");
        assert_eq!(rendered.slots.len(), 3);
        assert!(rendered.slots.iter().all(|slot| !slot.active));
        assert_eq!(rendered.slots[1].details, "Reading: -- bar | Confidence: --%");
        assert_eq!(view.preview(), &PreviewSource::Live);
    }

    #[test]
    fn test_apply_single_valve() {
        let mut view = FrameViewModel::new();
        view.apply_frame(&Frame::single(valve_open()));

        let rendered = view.render();
        assert_eq!(rendered.count, "FRAME (1 detection)");
        assert_eq!(rendered.slots[2].details, "State: open | Confidence: 92.0%");
        assert!(rendered.slots[2].active);
        assert!(!rendered.slots[0].active);
        assert!(!rendered.slots[1].active);
        assert_eq!(
            view.preview(),
            &PreviewSource::Detection("/static/targets/archive/valve.jpg".to_string())
        );
    }

    #[test]
    fn test_apply_frame_is_idempotent() {
        let frame = Frame::from_arrivals(vec![
            valve_open(),
            DetectionEvent::new(Category::Gauge, DateTime::from_timestamp(1_699_999_999, 0)),
        ]);
        let mut once = FrameViewModel::new();
        once.apply_frame(&frame);
        let mut twice = FrameViewModel::new();
        twice.apply_frame(&frame);
        twice.apply_frame(&frame);
        assert_eq!(once.render(), twice.render());
        assert_eq!(once.preview(), twice.preview());
    }

    #[test]
    fn test_absent_categories_revert_to_placeholder() {
        let mut view = FrameViewModel::new();
        view.apply_frame(&Frame::single(valve_open()));
        view.apply_frame(&Frame::single(DetectionEvent::new(Category::Aruco, None)));

        assert!(view.slot(SlotKind::Valve).is_none());
        assert!(view.slot(SlotKind::Aruco).is_some());
        assert_eq!(view.render().slots[2].details, SlotKind::Valve.placeholder());
        // No image on the new frame: preview stays on the previous detection.
        assert!(matches!(view.preview(), PreviewSource::Detection(_)));
    }

    #[test]
    fn test_unknown_category_counts_but_has_no_slot() {
        let mut view = FrameViewModel::new();
        view.apply_frame(&Frame::from_arrivals(vec![
            DetectionEvent::new(Category::Other("crack".to_string()), None),
            valve_open(),
        ]));
        assert_eq!(view.active_slots(), 1);
        assert_eq!(view.render().count, "FRAME (2 detections)");
    }

    #[test]
    fn test_live_camera_mode() {
        let mut view = FrameViewModel::new();
        view.apply_frame(&Frame::single(valve_open()));
        view.live_camera_mode();

        let rendered = view.render();
        assert_eq!(rendered.time, "[LIVE]");
        assert_eq!(rendered.count, "LIVE CAMERA");
        assert_eq!(view.active_slots(), 0);
        assert_eq!(rendered.slots[0].label, "ARUCO");
        assert_eq!(view.preview(), &PreviewSource::Live);
        assert!(view.is_live());
    }
}
