//! Writing captured and rendered images to disk

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Write `image` as an RGBA PNG at `path`, replacing any existing file
pub fn save_png(path: &Path, img: &RgbaImage) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_png(BufWriter::new(file), img)
        .with_context(|| format!("encoding PNG to {}", path.display()))?;
    log::info!(
        "Saved {}x{} image to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

/// Dump a raw capture as BMP
pub fn save_bmp(path: &Path, img: &RgbaImage) -> anyhow::Result<()> {
    img.save_with_format(path, image::ImageFormat::Bmp)
        .with_context(|| format!("writing BMP to {}", path.display()))?;
    log::debug!("Dumped capture to {}", path.display());
    Ok(())
}
