//! Shared geometry calculations for scene rendering

/// Rounded rectangle geometry
pub mod shape {
    /// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
    /// Outline drawn around the image bounds when enabled
    pub const OUTLINE_THICKNESS: f32 = 1.0;
}

/// Checkerboard painted behind the image
pub mod checker {
    /// Size of one repeating tile (two light and two dark squares)
    pub const TILE: u32 = 64;
    pub const LIGHT: [u8; 4] = [255, 255, 255, 255];
    pub const DARK: [u8; 4] = [220, 220, 220, 255];

    /// Color of the checkerboard at pixel `(x, y)`
    #[inline]
    pub fn color_at(x: u32, y: u32) -> [u8; 4] {
        let half = TILE / 2;
        let left = (x % TILE) < half;
        let top = (y % TILE) < half;
        if left == top { DARK } else { LIGHT }
    }
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Corner radius that fits inside a `width` x `height` box
#[inline]
pub fn clamp_radius(radius: f32, width: f32, height: f32) -> f32 {
    radius.max(0.0).min(width * 0.5).min(height * 0.5)
}
