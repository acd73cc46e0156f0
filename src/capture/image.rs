//! Captured screen image type

use image::RgbaImage;

use crate::domain::Rect;

/// A captured region of the screen
///
/// The pixel buffer is RGBA8 and cannot be mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedImage {
    rgba: RgbaImage,
    source: Rect,
}

impl CapturedImage {
    /// Wrap pixels grabbed from `source` (screen coordinates)
    pub fn new(rgba: RgbaImage, source: Rect) -> Self {
        log::debug!(
            "CapturedImage: {}x{} pixels from {:?}",
            rgba.width(),
            rgba.height(),
            source
        );
        Self { rgba, source }
    }

    /// Image not tied to any screen region, e.g. a stack composite
    pub fn detached(rgba: RgbaImage) -> Self {
        let source = Rect::from_size(rgba.width(), rgba.height());
        Self { rgba, source }
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.rgba.dimensions()
    }

    /// True when the image has no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Screen rectangle the pixels were taken from
    pub fn source(&self) -> Rect {
        self.source
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }
}
