//! Scene rasterization using tiny-skia
//!
//! These functions flatten the viewer scene (background, image, overlay
//! shapes) into one RgbaImage for saving to disk.

use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, checker, shape};
use crate::domain::{OverlayShape, RoundedRectAnnotation};

/// Options controlling how the scene is flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub antialiasing: bool,
    /// Paint the checkerboard under transparent image pixels
    pub background: bool,
    /// Frame the image bounds
    pub outline: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            antialiasing: true,
            background: true,
            outline: false,
        }
    }
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
///
/// Pixmaps hold premultiplied alpha, the image straight alpha.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(mut pixmap) = Pixmap::new(img.width(), img.height()) else {
        return;
    };
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    f(&mut pixmap);

    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
}

/// Build a rounded rectangle path using cubic bezier corners
fn build_rounded_rect_path(
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
    radius: f32,
) -> Option<tiny_skia::Path> {
    let r = geometry::clamp_radius(radius, max_x - min_x, max_y - min_y);
    if r <= 0.0 {
        let rect = tiny_skia::Rect::from_ltrb(min_x, min_y, max_x, max_y)?;
        return Some(PathBuilder::from_rect(rect));
    }
    let k = r * shape::BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(min_x + r, min_y);

    // Top edge and top-right corner
    pb.line_to(max_x - r, min_y);
    pb.cubic_to(max_x - r + k, min_y, max_x, min_y + r - k, max_x, min_y + r);

    // Right edge and bottom-right corner
    pb.line_to(max_x, max_y - r);
    pb.cubic_to(max_x, max_y - r + k, max_x - r + k, max_y, max_x - r, max_y);

    // Bottom edge and bottom-left corner
    pb.line_to(min_x + r, max_y);
    pb.cubic_to(min_x + r - k, max_y, min_x, max_y - r + k, min_x, max_y - r);

    // Left edge and top-left corner
    pb.line_to(min_x, min_y + r);
    pb.cubic_to(min_x, min_y + r - k, min_x + r - k, min_y, min_x + r, min_y);

    pb.close();
    pb.finish()
}

/// Draw rounded rectangle outlines onto an image
pub fn draw_rounded_rects_on_image(
    img: &mut RgbaImage,
    rects: &[&RoundedRectAnnotation],
    antialiasing: bool,
) {
    if rects.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        for rect in rects {
            let (min_x, min_y, max_x, max_y) = rect.bounds();
            if max_x - min_x <= 0.0 || max_y - min_y <= 0.0 {
                continue;
            }
            let Some(path) =
                build_rounded_rect_path(min_x, min_y, max_x, max_y, rect.style.corner_radius)
            else {
                continue;
            };

            let [r, g, b, a] = rect.style.color.to_rgba_u8();
            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = antialiasing;

            let stroke = Stroke {
                width: rect.style.stroke_width.max(1.0),
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    });
}

/// Draw all overlay shapes in scene order
pub fn draw_shapes_in_order(img: &mut RgbaImage, shapes: &[OverlayShape], antialiasing: bool) {
    let rects: Vec<&RoundedRectAnnotation> = shapes
        .iter()
        .map(|shape| match shape {
            OverlayShape::RoundedRect(r) => r,
        })
        .collect();
    draw_rounded_rects_on_image(img, &rects, antialiasing);
}

/// Checkerboard image of the given size
pub fn checkerboard(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba(checker::color_at(x, y)))
}

fn draw_outline(img: &mut RgbaImage, antialiasing: bool) {
    let (w, h) = (img.width() as f32, img.height() as f32);
    let half = shape::OUTLINE_THICKNESS * 0.5;
    let Some(rect) = tiny_skia::Rect::from_ltrb(half, half, w - half, h - half) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);

    with_pixmap(img, |pixmap| {
        let mut paint = Paint::default();
        paint.set_color_rgba8(96, 96, 96, 255);
        paint.anti_alias = antialiasing;
        let stroke = Stroke {
            width: shape::OUTLINE_THICKNESS,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    });
}

/// Flatten the image and its overlay shapes into a new image of the same size
pub fn render_scene(
    image: &RgbaImage,
    shapes: &[OverlayShape],
    options: SceneOptions,
) -> RgbaImage {
    let mut out = if options.background {
        let mut out = checkerboard(image.width(), image.height());
        image::imageops::overlay(&mut out, image, 0, 0);
        out
    } else {
        image.clone()
    };

    if options.outline {
        draw_outline(&mut out, options.antialiasing);
    }
    draw_shapes_in_order(&mut out, shapes, options.antialiasing);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeColor;
    use crate::domain::ShapeStyle;

    fn cyan_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> OverlayShape {
        let mut r = RoundedRectAnnotation::anchored(
            x1,
            y1,
            ShapeStyle {
                color: ShapeColor::default(),
                stroke_width: 2.0,
                corner_radius: 4.0,
            },
        );
        r.resize_to(x2, y2);
        OverlayShape::RoundedRect(r)
    }

    #[test]
    fn test_render_scene_keeps_size_and_draws_outline_edges() {
        let base = RgbaImage::from_pixel(100, 60, Rgba([0, 0, 0, 255]));
        let shapes = [cyan_rect(20.0, 10.0, 80.0, 50.0)];
        let out = render_scene(&base, &shapes, SceneOptions::default());

        assert_eq!(out.dimensions(), (100, 60));
        // middle of the top edge is stroked cyan
        let edge = out.get_pixel(50, 10);
        assert!(edge[1] > 128 && edge[2] > 128 && edge[0] < 64, "{edge:?}");
        // inside the outline stays untouched
        assert_eq!(*out.get_pixel(50, 30), Rgba([0, 0, 0, 255]));
        // outside the outline stays untouched
        assert_eq!(*out.get_pixel(5, 5), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_transparent_image_shows_checkerboard() {
        let base = RgbaImage::new(64, 64);
        let out = render_scene(&base, &[], SceneOptions::default());
        assert_eq!(out.get_pixel(0, 0).0, checker::DARK);
        assert_eq!(out.get_pixel(40, 0).0, checker::LIGHT);

        let bare = render_scene(
            &base,
            &[],
            SceneOptions {
                background: false,
                ..SceneOptions::default()
            },
        );
        assert_eq!(bare.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_zero_sized_shape_draws_nothing() {
        let base = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let shapes = [cyan_rect(10.0, 10.0, 10.0, 10.0)];
        let out = render_scene(&base, &shapes, SceneOptions::default());
        assert_eq!(out, base);
    }

    #[test]
    fn test_stroke_over_translucent_image_keeps_straight_alpha() {
        let base = RgbaImage::from_pixel(100, 60, Rgba([255, 0, 0, 128]));
        let shapes = [cyan_rect(20.0, 10.5, 80.0, 50.0)];
        let out = render_scene(
            &base,
            &shapes,
            SceneOptions {
                background: false,
                ..SceneOptions::default()
            },
        );

        // far from the stroke nothing changes
        assert_eq!(*out.get_pixel(5, 30), Rgba([255, 0, 0, 128]));

        // partially covered edge pixels: cyan over half-transparent red
        let mut edges = 0;
        for px in out.pixels() {
            let [_, g, _, a] = px.0;
            if !(150..=240).contains(&a) {
                continue;
            }
            edges += 1;
            let coverage = (a as f32 - 128.0) / 127.0;
            let expected = 255.0 * coverage * 255.0 / a as f32;
            assert!((g as f32 - expected).abs() <= 6.0, "{px:?}");
        }
        assert!(edges > 0);
    }

    #[test]
    fn test_outline_frames_bounds() {
        let base = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let out = render_scene(
            &base,
            &[],
            SceneOptions {
                outline: true,
                antialiasing: false,
                background: false,
            },
        );
        assert_ne!(*out.get_pixel(0, 10), Rgba([0, 0, 0, 255]));
        assert_eq!(*out.get_pixel(10, 10), Rgba([0, 0, 0, 255]));
    }
}
