//! System clipboard through arboard

use std::borrow::Cow;

use anyhow::Context;
use image::RgbaImage;

use super::ClipboardSink;

/// Clipboard handle opened on first use and kept for the app lifetime
///
/// Some platforms drop clipboard contents when the owning handle goes away,
/// so the handle is not reopened per copy.
#[derive(Default)]
pub struct ArboardClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> anyhow::Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().context("opening clipboard")?);
        }
        self.inner.as_mut().context("clipboard unavailable")
    }
}

impl ClipboardSink for ArboardClipboard {
    fn set_image(&mut self, image: &RgbaImage) -> anyhow::Result<()> {
        let data = arboard::ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Borrowed(image.as_raw()),
        };
        self.handle()?
            .set_image(data)
            .context("writing image to clipboard")?;
        log::info!(
            "Copied {}x{} image to clipboard",
            image.width(),
            image.height()
        );
        Ok(())
    }
}
