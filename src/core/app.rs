use anyhow::Context;

use crate::capture::{CapturedImage, ImageStack};
use crate::config::Config;
use crate::domain::{Point, Rect, SelectionAction};
use crate::platform::Platform;
use crate::session::messages::{AppEvent, OverlayAction, ViewAction};
use crate::session::shortcuts::{self, Key, Modifiers};
use crate::widget::{ImageView, RegionSelector};

/// Top-level capture window
///
/// Owns the selection overlay, the capture stack, the viewer (created on
/// first use) and the platform services. Children are torn down before the
/// platform in [`CaptureApp::close`].
pub struct CaptureApp {
    config: Config,
    selector: RegionSelector,
    stack: ImageStack,
    viewer: Option<ImageView>,
    platform: Platform,
    events: Vec<AppEvent>,
}

impl CaptureApp {
    /// Overlay covering `screen`, stack axis and viewer settings from `config`
    pub fn new(config: Config, screen: Rect, platform: Platform) -> Self {
        log::debug!("Capture overlay over {screen:?}");
        Self {
            stack: ImageStack::new(config.stack_axis),
            selector: RegionSelector::new(screen),
            viewer: None,
            platform,
            events: Vec::new(),
            config,
        }
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn stack(&self) -> &ImageStack {
        &self.stack
    }

    pub fn viewer(&self) -> Option<&ImageView> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut ImageView> {
        self.viewer.as_mut()
    }

    pub fn platform_mut(&mut self) -> &mut Platform {
        &mut self.platform
    }

    /// Take queued notifications
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }

    // Overlay input

    fn sync_overlay(&mut self) {
        let windows = self.platform.windows.as_mut();
        windows.set_overlay_mask(self.selector.dimmed_regions());
        windows.set_action_buttons(self.selector.action_anchor());
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.selector.press(at);
        self.sync_overlay();
    }

    pub fn pointer_move(&mut self, at: Point) {
        self.selector.drag(at);
        self.sync_overlay();
    }

    pub fn pointer_up(&mut self, at: Point) {
        self.selector.release(at);
        self.sync_overlay();
    }

    pub fn overlay_key(&mut self, key: Key, modifiers: Modifiers) -> anyhow::Result<bool> {
        let has_selection = self.selector.selection().is_some();
        match shortcuts::handle_overlay_key(key, modifiers, has_selection) {
            Some(action) => {
                self.perform(action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run an overlay button or shortcut
    pub fn perform(&mut self, action: OverlayAction) -> anyhow::Result<()> {
        match action {
            OverlayAction::Selection(SelectionAction::Confirm) => {
                self.confirm()?;
            }
            OverlayAction::Selection(SelectionAction::AddToStack) => self.add_to_stack()?,
            OverlayAction::Cancel => {
                self.selector.cancel();
                self.sync_overlay();
            }
        }
        Ok(())
    }

    // Capture

    fn grab_selection(&mut self) -> anyhow::Result<(Rect, CapturedImage)> {
        let rect = self
            .selector
            .take_selection()
            .context("no finished selection to capture")?;
        self.sync_overlay();
        let image = self
            .platform
            .grabber
            .grab(rect)
            .with_context(|| format!("grabbing {rect:?}"))?;
        Ok((rect, image))
    }

    /// Grab the selection and show it, or the stacked composite, in the viewer
    ///
    /// Returns the size of the image handed to the viewer.
    pub fn confirm(&mut self) -> anyhow::Result<(u32, u32)> {
        let (rect, grabbed) = self.grab_selection()?;

        let image = if self.stack.is_empty() {
            grabbed
        } else {
            log::debug!(
                "Showing {} stacked captures, discarding the fresh grab",
                self.stack.len()
            );
            self.stack.take_combined()?
        };

        if let Some(path) = &self.config.capture_dump
            && let Err(err) = crate::screenshot::save_bmp(path, image.rgba())
        {
            log::error!("Failed to dump capture: {err:#}");
        }

        let size = image.dimensions();
        let source = image.source();
        let viewer = self
            .viewer
            .get_or_insert_with(|| ImageView::new(&self.config));
        viewer.set_image(image);

        let windows = self.platform.windows.as_mut();
        windows.minimize_overlay();
        windows.show_viewer(rect.top_left());
        if self.config.pin_viewer_on_show
            && let Err(err) = viewer.set_on_top(windows, true)
        {
            log::warn!("Failed to pin viewer: {err:#}");
        }

        log::info!("Showing {}x{} capture from {source:?}", size.0, size.1);
        self.events.push(AppEvent::Shown {
            width: size.0,
            height: size.1,
        });
        Ok(size)
    }

    /// Grab the selection and push it onto the stack
    pub fn add_to_stack(&mut self) -> anyhow::Result<()> {
        let (_, grabbed) = self.grab_selection()?;
        match self.stack.add(grabbed) {
            Ok(()) => {
                log::info!("Added capture to stack ({} tiles)", self.stack.len());
                self.events.push(AppEvent::Stacked {
                    len: self.stack.len(),
                });
                Ok(())
            }
            Err(err) => {
                log::warn!("Capture rejected by stack: {err}");
                self.events.push(AppEvent::StackRejected(err.clone()));
                Err(err.into())
            }
        }
    }

    /// Forward a viewer action; fails if no viewer exists yet
    pub fn view_action(&mut self, action: ViewAction) -> anyhow::Result<()> {
        let viewer = self.viewer.as_mut().context("viewer is not open")?;
        viewer.perform(action, &mut self.platform)
    }

    /// Forward a key press to the viewer
    pub fn view_key(&mut self, key: Key, modifiers: Modifiers) -> anyhow::Result<bool> {
        match self.viewer.as_mut() {
            Some(viewer) => viewer.key(key, modifiers, &mut self.platform),
            None => Ok(false),
        }
    }

    /// Tear down children first, then the platform services
    pub fn close(mut self) {
        if let Some(viewer) = self.viewer.take() {
            if viewer.is_on_top()
                && let Err(err) = self.platform.windows.set_viewer_on_top(false)
            {
                log::warn!("Failed to clear always-on-top: {err:#}");
            }
            drop(viewer);
        }
        self.selector.cancel();
        self.stack.clear();
        log::debug!("Capture app closed");
        drop(self.platform);
    }
}
