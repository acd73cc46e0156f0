//! Screen grabs through xcap

use anyhow::{Context, bail};
use image::RgbaImage;
use xcap::Monitor;

use super::ScreenGrabber;
use crate::capture::CapturedImage;
use crate::domain::Rect;

/// Grabs from every monitor the requested rectangle touches
#[derive(Debug, Default)]
pub struct XcapGrabber;

impl XcapGrabber {
    pub fn new() -> Self {
        Self
    }
}

struct MonitorFrame {
    /// Monitor bounds in logical screen coordinates
    rect: Rect,
    image: RgbaImage,
}

fn monitor_rect(monitor: &Monitor) -> anyhow::Result<Rect> {
    let x = monitor.x()?;
    let y = monitor.y()?;
    let width = monitor.width()? as i32;
    let height = monitor.height()? as i32;
    Ok(Rect::new(x, y, x + width, y + height))
}

fn capture_monitor(monitor: &Monitor) -> anyhow::Result<MonitorFrame> {
    let rect = monitor_rect(monitor)?;
    let shot = monitor.capture_image().context("capturing monitor")?;
    let (width, height) = (shot.width(), shot.height());
    let image = RgbaImage::from_raw(width, height, shot.into_raw())
        .context("monitor frame has an unexpected buffer size")?;
    Ok(MonitorFrame { rect, image })
}

/// Copy the part of `frame` inside `region` onto `canvas` (origin at `region`)
fn paint_frame(canvas: &mut RgbaImage, region: Rect, frame: &MonitorFrame) {
    let Some(visible) = frame.rect.intersect(region) else {
        return;
    };

    // Physical pixels per logical pixel on this monitor
    let scale_x = frame.image.width() as f64 / frame.rect.width() as f64;
    let scale_y = frame.image.height() as f64 / frame.rect.height() as f64;

    let x = ((visible.left - frame.rect.left) as f64 * scale_x).max(0.) as u32;
    let y = ((visible.top - frame.rect.top) as f64 * scale_y).max(0.) as u32;
    let width = (visible.width() as f64 * scale_x).max(0.) as u32;
    let height = (visible.height() as f64 * scale_y).max(0.) as u32;

    let mut part = image::imageops::crop_imm(&frame.image, x, y, width, height).to_image();
    let logical = (visible.width() as u32, visible.height() as u32);
    if part.dimensions() != logical {
        part = image::imageops::resize(
            &part,
            logical.0,
            logical.1,
            image::imageops::FilterType::Lanczos3,
        );
    }

    let dx = i64::from(visible.left) - i64::from(region.left);
    let dy = i64::from(visible.top) - i64::from(region.top);
    image::imageops::replace(canvas, &part, dx, dy);
}

impl ScreenGrabber for XcapGrabber {
    fn grab(&mut self, rect: Rect) -> anyhow::Result<CapturedImage> {
        let Some(dims) = rect.dimensions() else {
            bail!("cannot grab an empty region {rect:?}");
        };

        let monitors = Monitor::all().context("listing monitors")?;
        let mut canvas = RgbaImage::new(dims.width(), dims.height());
        let mut touched = 0;
        for monitor in &monitors {
            let bounds = monitor_rect(monitor)?;
            if bounds.intersect(rect).is_none() {
                continue;
            }
            let frame = capture_monitor(monitor)?;
            paint_frame(&mut canvas, rect, &frame);
            touched += 1;
        }

        if touched == 0 {
            bail!("region {rect:?} is not on any monitor");
        }
        log::debug!("Grabbed {rect:?} from {touched} monitor(s)");
        Ok(CapturedImage::new(canvas, rect))
    }
}
