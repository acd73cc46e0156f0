//! Zoomable image viewer with a small overlay scene
//!
//! The host feeds pointer, wheel and key input in view coordinates; the
//! viewer keeps the scene (image + shapes), the zoom/pan viewport and the
//! window flags that belong to it.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::capture::CapturedImage;
use crate::config::Config;
use crate::domain::{DrawMode, OverlayShape, RoundedRectAnnotation, ShapeStyle};
use crate::platform::{ClipboardSink, Platform, WindowHost};
use crate::render::{self, SceneOptions};
use crate::session::messages::{ViewAction, ViewEvent};
use crate::session::shortcuts::{self, Key, Modifiers};

/// Zoom limits and step factors
pub mod zoom {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 10.0;
    pub const IN_FACTOR: f32 = 2.0;
    pub const OUT_FACTOR: f32 = 0.5;
    /// Wheel multiplier base, raised to `delta / WHEEL_STEP`
    pub const WHEEL_BASE: f32 = 1.2;
    pub const WHEEL_STEP: f32 = 240.0;
    /// Scale differences below this count as unchanged
    pub const EPSILON: f32 = 1e-4;
}

/// Scene to view mapping: `view = scene * scale + pan`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f32,
    pan: (f32, f32),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: (0.0, 0.0),
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan(&self) -> (f32, f32) {
        self.pan
    }

    pub fn to_scene(&self, (x, y): (f32, f32)) -> (f32, f32) {
        ((x - self.pan.0) / self.scale, (y - self.pan.1) / self.scale)
    }

    pub fn to_view(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (x * self.scale + self.pan.0, y * self.scale + self.pan.1)
    }

    /// Multiply the scale by `factor` around `anchor` (view coordinates)
    ///
    /// The result is clamped to `[zoom::MIN, zoom::MAX]`. Returns whether
    /// the scale changed.
    pub fn zoom_at(&mut self, factor: f32, anchor: (f32, f32)) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let old = self.scale;
        let new = (old * factor).clamp(zoom::MIN, zoom::MAX);
        if (new - old).abs() <= zoom::EPSILON {
            return false;
        }

        // Keep the scene point under the anchor fixed
        let (sx, sy) = self.to_scene(anchor);
        self.scale = new;
        self.pan = (anchor.0 - sx * new, anchor.1 - sy * new);
        true
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }

    /// Back to 1:1 at the origin; returns whether the scale changed
    pub fn reset(&mut self) -> bool {
        let changed = (self.scale - 1.0).abs() > zoom::EPSILON;
        *self = Self::default();
        changed
    }
}

/// Pointer gesture in progress
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Resizing the shape at this index
    Drawing(usize),
    /// Dragging the shape at this index; last pointer position in scene space
    Moving { index: usize, last: (f32, f32) },
    /// Scrolling the view; last pointer position in view space
    Panning { last: (f32, f32) },
}

pub struct ImageView {
    image: Option<CapturedImage>,
    shapes: Vec<OverlayShape>,
    viewport: Viewport,
    /// Size of the visible area, used as the zoom anchor for buttons
    view_size: (f32, f32),
    mode: DrawMode,
    gesture: Gesture,
    on_top: bool,
    options: SceneOptions,
    style: ShapeStyle,
    output_path: PathBuf,
    events: Vec<ViewEvent>,
}

impl ImageView {
    pub fn new(config: &Config) -> Self {
        Self {
            image: None,
            shapes: Vec::new(),
            viewport: Viewport::default(),
            view_size: (0.0, 0.0),
            mode: DrawMode::None,
            gesture: Gesture::Idle,
            on_top: false,
            options: SceneOptions {
                antialiasing: config.antialiasing,
                background: config.view_background,
                outline: config.view_outline,
            },
            style: config.shape_style(),
            output_path: config.output_path.clone(),
            events: Vec::new(),
        }
    }

    /// Replace the scene with a new raster; shapes are discarded
    pub fn set_image(&mut self, image: CapturedImage) {
        log::debug!("Viewer image set to {}x{}", image.width(), image.height());
        self.image = Some(image);
        self.shapes.clear();
        self.gesture = Gesture::Idle;
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    /// Scene bounds, equal to the image extent
    pub fn scene_size(&self) -> (u32, u32) {
        self.image.as_ref().map_or((0, 0), |img| img.dimensions())
    }

    pub fn shapes(&self) -> &[OverlayShape] {
        &self.shapes
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom_factor(&self) -> f32 {
        self.viewport.scale()
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.mode
    }

    pub fn is_on_top(&self) -> bool {
        self.on_top
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn set_output_path(&mut self, path: impl Into<PathBuf>) {
        self.output_path = path.into();
    }

    pub fn set_antialiasing(&mut self, antialiasing: bool) {
        self.options.antialiasing = antialiasing;
    }

    pub fn set_view_background(&mut self, enable: bool) {
        self.options.background = enable;
    }

    pub fn set_view_outline(&mut self, enable: bool) {
        self.options.outline = enable;
    }

    /// The host reports the visible area after layout
    pub fn resize(&mut self, width: f32, height: f32) {
        self.view_size = (width, height);
    }

    /// Take queued notifications
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    // Zoom

    fn zoom_by(&mut self, factor: f32, anchor: (f32, f32)) {
        if self.viewport.zoom_at(factor, anchor) {
            let scale = self.viewport.scale();
            log::debug!("Zoom: {scale:.2}x");
            self.events.push(ViewEvent::ZoomChanged(scale));
        }
    }

    fn view_center(&self) -> (f32, f32) {
        (self.view_size.0 * 0.5, self.view_size.1 * 0.5)
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(zoom::IN_FACTOR, self.view_center());
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(zoom::OUT_FACTOR, self.view_center());
    }

    pub fn reset_zoom(&mut self) {
        if self.viewport.reset() {
            self.events.push(ViewEvent::ZoomChanged(1.0));
        }
    }

    /// Wheel zoom anchored under the cursor
    pub fn wheel(&mut self, delta: f32, cursor: (f32, f32)) {
        let factor = zoom::WHEEL_BASE.powf(delta / zoom::WHEEL_STEP);
        self.zoom_by(factor, cursor);
    }

    // Drawing

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        if self.mode != mode {
            self.mode = mode;
            self.gesture = Gesture::Idle;
            self.events.push(ViewEvent::DrawModeChanged(mode));
        }
    }

    /// Leave drawing and go back to pan interaction
    pub fn reset_mode(&mut self) {
        self.set_draw_mode(DrawMode::None);
    }

    pub fn pointer_down(&mut self, at: (f32, f32)) {
        let scene = self.viewport.to_scene(at);
        self.gesture = match self.mode {
            DrawMode::Rectangle => {
                let shape = RoundedRectAnnotation::anchored(scene.0, scene.1, self.style);
                self.shapes.push(OverlayShape::RoundedRect(shape));
                Gesture::Drawing(self.shapes.len() - 1)
            }
            DrawMode::Circle | DrawMode::Line | DrawMode::Text => {
                log::debug!("{:?} drawing is not available", self.mode);
                Gesture::Idle
            }
            DrawMode::None => match self.shape_at(scene) {
                Some(index) => Gesture::Moving { index, last: scene },
                None => Gesture::Panning { last: at },
            },
        };
    }

    pub fn pointer_move(&mut self, at: (f32, f32)) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing(index) => {
                let (x, y) = self.viewport.to_scene(at);
                if let Some(shape) = self.shapes.get_mut(index) {
                    shape.resize_to(x, y);
                }
            }
            Gesture::Moving { index, last } => {
                let scene = self.viewport.to_scene(at);
                if let Some(shape) = self.shapes.get_mut(index) {
                    shape.translate(scene.0 - last.0, scene.1 - last.1);
                }
                self.gesture = Gesture::Moving { index, last: scene };
            }
            Gesture::Panning { last } => {
                self.viewport.pan_by(at.0 - last.0, at.1 - last.1);
                self.gesture = Gesture::Panning { last: at };
            }
        }
    }

    /// Finish the gesture; a drawn shape is final from here on
    pub fn pointer_up(&mut self, _at: (f32, f32)) {
        if let Gesture::Drawing(index) = self.gesture
            && let Some(OverlayShape::RoundedRect(r)) = self.shapes.get(index)
        {
            log::debug!("Finished rectangle {:?}", r.bounds());
        }
        self.gesture = Gesture::Idle;
    }

    /// Topmost shape under a scene point
    fn shape_at(&self, (x, y): (f32, f32)) -> Option<usize> {
        self.shapes.iter().rposition(|shape| shape.contains(x, y))
    }

    // Actions

    /// Place the current raster (without shapes) on the clipboard
    pub fn copy(&mut self, clipboard: &mut dyn ClipboardSink) -> anyhow::Result<()> {
        let image = self.image.as_ref().context("no image to copy")?;
        clipboard.set_image(image.rgba())?;
        self.events.push(ViewEvent::Copied);
        Ok(())
    }

    /// Scene flattened at 1:1, shapes included
    pub fn render(&self) -> anyhow::Result<image::RgbaImage> {
        let image = self.image.as_ref().context("no image to render")?;
        Ok(render::render_scene(image.rgba(), &self.shapes, self.options))
    }

    /// Rasterize the scene and write it to the output path
    pub fn save(&mut self) -> anyhow::Result<PathBuf> {
        let rendered = self.render()?;
        crate::screenshot::save_png(&self.output_path, &rendered)?;
        let path = self.output_path.clone();
        self.events.push(ViewEvent::Saved(path.clone()));
        Ok(path)
    }

    /// Flip the always-on-top hint of the viewer window
    pub fn toggle_on_top(&mut self, windows: &mut dyn WindowHost) -> anyhow::Result<bool> {
        self.set_on_top(windows, !self.on_top)?;
        Ok(self.on_top)
    }

    pub fn set_on_top(&mut self, windows: &mut dyn WindowHost, on_top: bool) -> anyhow::Result<()> {
        windows.set_viewer_on_top(on_top)?;
        if self.on_top != on_top {
            self.on_top = on_top;
            log::info!("Viewer always-on-top: {on_top}");
            self.events.push(ViewEvent::OnTopChanged(on_top));
        }
        Ok(())
    }

    /// Run a toolbar or shortcut action
    pub fn perform(&mut self, action: ViewAction, platform: &mut Platform) -> anyhow::Result<()> {
        match action {
            ViewAction::Copy => self.copy(platform.clipboard.as_mut())?,
            ViewAction::Save => {
                self.save()?;
            }
            ViewAction::ToggleOnTop => {
                self.toggle_on_top(platform.windows.as_mut())?;
            }
            ViewAction::ZoomIn => self.zoom_in(),
            ViewAction::ZoomOut => self.zoom_out(),
            ViewAction::ResetZoom => self.reset_zoom(),
            ViewAction::Draw(mode) => self.set_draw_mode(mode),
            ViewAction::Reset => self.reset_mode(),
        }
        Ok(())
    }

    /// Handle a key press; returns whether it was consumed
    pub fn key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        platform: &mut Platform,
    ) -> anyhow::Result<bool> {
        match shortcuts::handle_view_key(key, modifiers) {
            Some(action) => {
                self.perform(action, platform)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::fake_platform;
    use image::{Rgba, RgbaImage};

    fn view_with_image(w: u32, h: u32) -> ImageView {
        let mut view = ImageView::new(&Config::default());
        view.set_image(CapturedImage::detached(RgbaImage::from_pixel(
            w,
            h,
            Rgba([0, 0, 0, 255]),
        )));
        view
    }

    fn zoom_events(view: &mut ImageView) -> usize {
        view.drain_events()
            .iter()
            .filter(|e| matches!(e, ViewEvent::ZoomChanged(_)))
            .count()
    }

    #[test]
    fn test_zoom_in_is_clamped() {
        let mut view = view_with_image(10, 10);
        for _ in 0..20 {
            view.zoom_in();
            assert!(view.zoom_factor() <= zoom::MAX);
        }
        assert!((view.zoom_factor() - zoom::MAX).abs() < zoom::EPSILON);
        // 2, 4, 8, 10 then no further changes
        assert_eq!(zoom_events(&mut view), 4);
    }

    #[test]
    fn test_zoom_out_is_clamped() {
        let mut view = view_with_image(10, 10);
        for _ in 0..20 {
            view.zoom_out();
            assert!(view.zoom_factor() >= zoom::MIN);
        }
        assert!((view.zoom_factor() - zoom::MIN).abs() < zoom::EPSILON);
    }

    #[test]
    fn test_reset_zoom_notifies_once() {
        let mut view = view_with_image(10, 10);
        view.zoom_in();
        view.drain_events();

        view.reset_zoom();
        view.reset_zoom();
        assert_eq!(zoom_events(&mut view), 1);
        assert_eq!(view.zoom_factor(), 1.0);

        // already at 1:1
        view.reset_zoom();
        assert_eq!(zoom_events(&mut view), 0);
    }

    #[test]
    fn test_wheel_factor_and_anchor() {
        let mut view = view_with_image(400, 400);
        let cursor = (120.0, 80.0);
        let before = view.viewport().to_scene(cursor);

        view.wheel(240.0, cursor);
        assert!((view.zoom_factor() - 1.2).abs() < 1e-5);

        let after = view.viewport().to_scene(cursor);
        assert!((before.0 - after.0).abs() < 1e-3);
        assert!((before.1 - after.1).abs() < 1e-3);

        view.wheel(-480.0, cursor);
        assert!((view.zoom_factor() - 1.2 / 1.44).abs() < 1e-5);
    }

    #[test]
    fn test_wheel_is_clamped() {
        let mut view = view_with_image(10, 10);
        view.wheel(240.0 * 100.0, (0.0, 0.0));
        assert!((view.zoom_factor() - zoom::MAX).abs() < zoom::EPSILON);
        view.wheel(-240.0 * 100.0, (0.0, 0.0));
        assert!((view.zoom_factor() - zoom::MIN).abs() < zoom::EPSILON);
    }

    #[test]
    fn test_rectangle_gesture_creates_one_shape() {
        let mut view = view_with_image(200, 200);
        view.set_draw_mode(DrawMode::Rectangle);

        view.pointer_down((10.0, 20.0));
        let OverlayShape::RoundedRect(r) = &view.shapes()[0];
        assert_eq!(r.bounds(), (10.0, 20.0, 10.0, 20.0));

        view.pointer_move((50.0, 60.0));
        view.pointer_move((80.0, 90.0));
        view.pointer_up((80.0, 90.0));
        assert_eq!(view.shapes().len(), 1);
        let OverlayShape::RoundedRect(r) = &view.shapes()[0];
        assert_eq!(r.bounds(), (10.0, 20.0, 80.0, 90.0));

        // after release the shape no longer follows the pointer
        view.pointer_move((150.0, 150.0));
        let OverlayShape::RoundedRect(r) = &view.shapes()[0];
        assert_eq!(r.bounds(), (10.0, 20.0, 80.0, 90.0));
    }

    #[test]
    fn test_drawing_uses_scene_coordinates() {
        let mut view = view_with_image(200, 200);
        view.zoom_in();
        view.set_draw_mode(DrawMode::Rectangle);
        view.pointer_down((40.0, 40.0));
        view.pointer_move((100.0, 60.0));
        view.pointer_up((100.0, 60.0));

        let OverlayShape::RoundedRect(r) = &view.shapes()[0];
        assert_eq!(r.bounds(), (20.0, 20.0, 50.0, 30.0));
    }

    #[test]
    fn test_unavailable_modes_draw_nothing() {
        let mut view = view_with_image(100, 100);
        for mode in [DrawMode::Circle, DrawMode::Line, DrawMode::Text] {
            view.set_draw_mode(mode);
            view.pointer_down((10.0, 10.0));
            view.pointer_move((50.0, 50.0));
            view.pointer_up((50.0, 50.0));
        }
        assert!(view.shapes().is_empty());
        assert_eq!(view.viewport().pan(), (0.0, 0.0));
    }

    #[test]
    fn test_pan_mode_moves_shapes_or_view() {
        let mut view = view_with_image(200, 200);
        view.set_draw_mode(DrawMode::Rectangle);
        view.pointer_down((10.0, 10.0));
        view.pointer_move((50.0, 50.0));
        view.pointer_up((50.0, 50.0));
        view.reset_mode();

        // grab the shape and move it
        view.pointer_down((30.0, 30.0));
        view.pointer_move((40.0, 35.0));
        view.pointer_up((40.0, 35.0));
        let OverlayShape::RoundedRect(r) = &view.shapes()[0];
        assert_eq!(r.bounds(), (20.0, 15.0, 60.0, 55.0));
        assert_eq!(view.viewport().pan(), (0.0, 0.0));

        // empty area pans
        view.pointer_down((150.0, 150.0));
        view.pointer_move((140.0, 160.0));
        view.pointer_up((140.0, 160.0));
        assert_eq!(view.viewport().pan(), (-10.0, 10.0));
    }

    #[test]
    fn test_set_image_clears_scene() {
        let mut view = view_with_image(100, 100);
        view.set_draw_mode(DrawMode::Rectangle);
        view.pointer_down((1.0, 1.0));
        view.pointer_move((9.0, 9.0));

        view.set_image(CapturedImage::detached(RgbaImage::new(30, 40)));
        assert!(view.shapes().is_empty());
        assert_eq!(view.scene_size(), (30, 40));

        // the interrupted gesture does not resurrect
        view.pointer_move((20.0, 20.0));
        assert!(view.shapes().is_empty());
    }

    #[test]
    fn test_toggle_on_top_alternates() {
        let (mut platform, journal) = fake_platform(vec![]);
        let mut view = view_with_image(10, 10);

        assert!(view.toggle_on_top(platform.windows.as_mut()).unwrap());
        assert!(!view.toggle_on_top(platform.windows.as_mut()).unwrap());
        assert_eq!(journal.borrow().on_top, vec![true, false]);
    }

    #[test]
    fn test_copy_puts_raw_image_on_clipboard() {
        let (mut platform, journal) = fake_platform(vec![]);
        let mut view = view_with_image(12, 7);
        view.set_draw_mode(DrawMode::Rectangle);
        view.pointer_down((1.0, 1.0));
        view.pointer_move((10.0, 5.0));
        view.pointer_up((10.0, 5.0));

        view.key(Key::Character('c'), Modifiers::CTRL, &mut platform)
            .unwrap();

        let journal = journal.borrow();
        assert_eq!(journal.clipboard.len(), 1);
        assert_eq!(
            journal.clipboard[0],
            RgbaImage::from_pixel(12, 7, Rgba([0, 0, 0, 255]))
        );
    }

    #[test]
    fn test_copy_without_image_fails() {
        let (mut platform, _journal) = fake_platform(vec![]);
        let mut view = ImageView::new(&Config::default());
        assert!(view.copy(platform.clipboard.as_mut()).is_err());
    }

    #[test]
    fn test_save_writes_scene_with_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let (mut platform, _journal) = fake_platform(vec![]);
        let mut view = view_with_image(100, 60);
        view.set_output_path(dir.path().join("output.png"));

        view.set_draw_mode(DrawMode::Rectangle);
        view.pointer_down((20.0, 10.0));
        view.pointer_move((80.0, 50.0));
        view.pointer_up((80.0, 50.0));

        assert!(
            view.key(Key::Character('s'), Modifiers::CTRL, &mut platform)
                .unwrap()
        );

        let saved = image::open(dir.path().join("output.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(saved.dimensions(), (100, 60));
        assert_ne!(*saved.get_pixel(50, 10), Rgba([0, 0, 0, 255]));
        assert_eq!(*saved.get_pixel(50, 30), Rgba([0, 0, 0, 255]));
        assert!(
            view.drain_events()
                .contains(&ViewEvent::Saved(dir.path().join("output.png")))
        );
    }

    #[test]
    fn test_unbound_key_is_not_consumed() {
        let (mut platform, _journal) = fake_platform(vec![]);
        let mut view = view_with_image(1, 1);
        assert!(
            !view
                .key(Key::Character('q'), Modifiers::NONE, &mut platform)
                .unwrap()
        );
    }
}
