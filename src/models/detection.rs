//! Canonical detection record.
//!
//! Everything downstream of [`crate::engine::normalizer`] works with
//! [`DetectionEvent`]; raw payload shapes never leave the normalizer.

use chrono::{DateTime, Utc};
use std::fmt;

/// Category tag of a detection.
///
/// Unknown tags are preserved in [`Category::Other`] so they can still be
/// listed; a missing tag becomes `Other("unknown")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Aruco,
    Gauge,
    Valve,
    /// Live-feed ping. Never a history item, only an image-refresh signal.
    LiveData,
    Other(String),
}

impl Category {
    /// Tag used when a payload carries no usable category.
    pub const UNKNOWN_TAG: &'static str = "unknown";

    /// Resolve a raw tag. Matching is case-insensitive and ignores padding.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "aruco" => Category::Aruco,
            "gauge" => Category::Gauge,
            "valve" => Category::Valve,
            "livedata" => Category::LiveData,
            "" => Category::Other(Self::UNKNOWN_TAG.to_string()),
            _ => Category::Other(normalized),
        }
    }

    /// Lowercase wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Aruco => "aruco",
            Category::Gauge => "gauge",
            Category::Valve => "valve",
            Category::LiveData => "livedata",
            Category::Other(tag) => tag.as_str(),
        }
    }

    /// Uppercase label shown in lists and slot headers.
    pub fn label(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }

    pub fn is_live_data(&self) -> bool {
        matches!(self, Category::LiveData)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-specific fields of a detection.
///
/// Every field is optional; formatting substitutes sentinels for whatever
/// is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionAttributes {
    /// Confidence score in `[0, 1]`.
    pub confidence: Option<f64>,
    /// Valve state label (`open`, `closed`, ...).
    pub state: Option<String>,
    /// Gauge reading, kept as display text (source may send number or string).
    pub reading: Option<String>,
    pub unit: Option<String>,
    /// ArUco marker identifier.
    pub marker_id: Option<String>,
    pub position: Option<Vec<f64>>,
    pub rotation: Option<Vec<f64>>,
    /// All source fields except `confidence`, for categories without a
    /// dedicated layout.
    pub extra: Vec<(String, String)>,
}

/// Canonical detection record.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionEvent {
    pub category: Category,
    /// `None` when the source timestamp could not be resolved.
    pub captured_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub thumb_url: Option<String>,
    /// `None` when the payload had no attribute object at all.
    pub attributes: Option<DetectionAttributes>,
}

impl DetectionEvent {
    /// Minimal event, mostly useful for tests and synthetic frames.
    pub fn new(category: Category, captured_at: Option<DateTime<Utc>>) -> Self {
        Self {
            category,
            captured_at,
            image_url: None,
            thumb_url: None,
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: DetectionAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Image to show for this event in a list (thumbnail preferred).
    pub fn list_image(&self) -> Option<&str> {
        self.thumb_url.as_deref().or(self.image_url.as_deref())
    }

    /// Whether two events describe the same observation.
    ///
    /// Replays after a reconnect re-deliver identical payloads; the ring
    /// uses this to drop them. Image references are ignored because the
    /// backend may re-archive the same frame under a new name.
    pub fn same_observation(&self, other: &DetectionEvent) -> bool {
        self.category == other.category
            && self.captured_at == other.captured_at
            && self.attributes == other.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_tag() {
        assert_eq!(Category::from_tag("valve"), Category::Valve);
        assert_eq!(Category::from_tag(" GAUGE "), Category::Gauge);
        assert_eq!(Category::from_tag("ArUco"), Category::Aruco);
        assert_eq!(Category::from_tag("livedata"), Category::LiveData);
        assert_eq!(
            Category::from_tag("Person"),
            Category::Other("person".to_string())
        );
        assert_eq!(
            Category::from_tag(""),
            Category::Other("unknown".to_string())
        );
    }

    #[test]
    fn test_category_label() {
        assert_eq!(Category::Valve.label(), "VALVE");
        assert_eq!(Category::Other("crack".to_string()).label(), "CRACK");
    }

    #[test]
    fn test_list_image_prefers_thumbnail() {
        let mut event = DetectionEvent::new(Category::Valve, None).with_image("/full.jpg");
        assert_eq!(event.list_image(), Some("/full.jpg"));
        event.thumb_url = Some("/thumb.jpg".to_string());
        assert_eq!(event.list_image(), Some("/thumb.jpg"));
    }

    #[test]
    fn test_same_observation_ignores_images() {
        let at = DateTime::from_timestamp(1_700_000_000, 0);
        let a = DetectionEvent::new(Category::Gauge, at).with_image("/a.jpg");
        let b = DetectionEvent::new(Category::Gauge, at).with_image("/b.jpg");
        assert!(a.same_observation(&b));

        let later = DateTime::from_timestamp(1_700_000_001, 0);
        let c = DetectionEvent::new(Category::Gauge, later);
        assert!(!a.same_observation(&c));
    }
}
