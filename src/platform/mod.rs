//! Host platform seams
//!
//! The core never talks to a display server directly. Screen grabs, the
//! clipboard and window-manager hints go through these traits; the
//! `system` feature provides desktop implementations for the first two.

use image::RgbaImage;

use crate::capture::CapturedImage;
use crate::domain::{Point, Rect};

#[cfg(feature = "system")]
pub mod clipboard;
#[cfg(feature = "system")]
pub mod grabber;

#[cfg(feature = "system")]
pub use clipboard::ArboardClipboard;
#[cfg(feature = "system")]
pub use grabber::XcapGrabber;

/// Reads display pixels
pub trait ScreenGrabber {
    /// Grab the pixel contents of the display clipped to `rect`
    fn grab(&mut self, rect: Rect) -> anyhow::Result<CapturedImage>;
}

/// Writes raster images to the system clipboard
pub trait ClipboardSink {
    fn set_image(&mut self, image: &RgbaImage) -> anyhow::Result<()>;
}

/// Window-manager operations the core relies on
pub trait WindowHost {
    /// Set or clear the always-on-top hint of the viewer window
    fn set_viewer_on_top(&mut self, on_top: bool) -> anyhow::Result<()>;

    /// Show the viewer with its top-left corner at `at`
    fn show_viewer(&mut self, at: Point);

    /// Minimize the capture overlay once a capture is handed to the viewer
    fn minimize_overlay(&mut self);

    /// Dim everything outside the selection; an empty slice removes the mask
    fn set_overlay_mask(&mut self, _dimmed: &[Rect]) {}

    /// Show the confirm/add buttons at `anchor`, or hide them
    fn set_action_buttons(&mut self, _anchor: Option<Point>) {}
}

/// Bundle of every platform service, owned by the app
pub struct Platform {
    pub grabber: Box<dyn ScreenGrabber>,
    pub clipboard: Box<dyn ClipboardSink>,
    pub windows: Box<dyn WindowHost>,
}

impl Platform {
    pub fn new(
        grabber: impl ScreenGrabber + 'static,
        clipboard: impl ClipboardSink + 'static,
        windows: impl WindowHost + 'static,
    ) -> Self {
        Self {
            grabber: Box::new(grabber),
            clipboard: Box::new(clipboard),
            windows: Box::new(windows),
        }
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
