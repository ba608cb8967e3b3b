//! Preview image metadata.

use image::ImageError;

/// What the dashboard keeps from a fetched frame image.
///
/// The terminal cannot show the picture itself, so only the size and
/// dimensions are reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub bytes: usize,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Decode just enough of `data` to learn its dimensions.
    pub fn decode(data: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(data)?;
        Ok(Self {
            bytes: data.len(),
            width: decoded.width(),
            height: decoded.height(),
        })
    }

    pub fn summary(&self) -> String {
        format!("{}x{} ({} KB)", self.width, self.height, self.bytes.div_ceil(1024))
    }
}
