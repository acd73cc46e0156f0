//! Overlay shapes drawn on top of a captured image
//!
//! All coordinates are scene coordinates, i.e. image pixels at zoom 1.

use crate::config::ShapeColor;

/// Shape kind selected in the viewer toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Pan/scroll interaction, no drawing
    #[default]
    None,
    Circle,
    Rectangle,
    Line,
    Text,
}

/// Stroke style of an overlay shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    pub color: ShapeColor,
    pub stroke_width: f32,
    pub corner_radius: f32,
}

/// Rounded rectangle outline drawn on the viewer scene
#[derive(Clone, Debug, PartialEq)]
pub struct RoundedRectAnnotation {
    /// Corner fixed by the pointer-down
    pub start_x: f32,
    pub start_y: f32,
    /// Corner following the pointer
    pub end_x: f32,
    pub end_y: f32,
    pub style: ShapeStyle,
}

impl RoundedRectAnnotation {
    /// Zero-sized rectangle anchored at `(x, y)`
    pub fn anchored(x: f32, y: f32, style: ShapeStyle) -> Self {
        Self {
            start_x: x,
            start_y: y,
            end_x: x,
            end_y: y,
            style,
        }
    }

    pub fn resize_to(&mut self, x: f32, y: f32) {
        self.end_x = x;
        self.end_y = y;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.start_x += dx;
        self.start_y += dy;
        self.end_x += dx;
        self.end_y += dy;
    }

    /// `(min_x, min_y, max_x, max_y)` regardless of drag direction
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        crate::render::geometry::normalize_rect(self.start_x, self.start_y, self.end_x, self.end_y)
    }

    /// Hit test against the filled bounds, widened by half the stroke
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds();
        let slack = self.style.stroke_width * 0.5;
        x >= min_x - slack && x <= max_x + slack && y >= min_y - slack && y <= max_y + slack
    }
}

/// Any shape that can live in the viewer scene
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayShape {
    RoundedRect(RoundedRectAnnotation),
}

impl OverlayShape {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            OverlayShape::RoundedRect(r) => r.contains(x, y),
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            OverlayShape::RoundedRect(r) => r.translate(dx, dy),
        }
    }

    pub fn resize_to(&mut self, x: f32, y: f32) {
        match self {
            OverlayShape::RoundedRect(r) => r.resize_to(x, y),
        }
    }
}
