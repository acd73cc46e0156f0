//! Stacking of several captures into one composite image

use image::RgbaImage;

use super::image::CapturedImage;
use crate::domain::StackAxis;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Image {} {found} does not match the stack's {expected}", .axis.cross_name())]
    DimensionMismatch {
        axis: StackAxis,
        expected: u32,
        found: u32,
    },

    #[error("Nothing to combine, the stack is empty")]
    Empty,
}

/// Ordered captures waiting to be concatenated along one axis
#[derive(Debug, Clone, Default)]
pub struct ImageStack {
    axis: StackAxis,
    tiles: Vec<CapturedImage>,
    /// Shared cross-axis dimension, fixed by the first accepted tile
    cross: Option<u32>,
    /// Sum of tile extents along the stacking axis
    total: u32,
}

impl ImageStack {
    pub fn new(axis: StackAxis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    pub fn axis(&self) -> StackAxis {
        self.axis
    }

    /// Append a tile, rejecting it if it would break the shared dimension
    pub fn add(&mut self, image: CapturedImage) -> Result<(), StackError> {
        if image.is_empty() {
            return Err(StackError::EmptyImage);
        }

        let dims = image.dimensions();
        let cross = self.axis.across(dims);
        if let Some(expected) = self.cross
            && expected != cross
        {
            return Err(StackError::DimensionMismatch {
                axis: self.axis,
                expected,
                found: cross,
            });
        }

        self.cross = Some(cross);
        self.total += self.axis.along(dims);
        self.tiles.push(image);
        log::debug!(
            "Stacked tile {}x{}, {} tiles, total extent {}",
            dims.0,
            dims.1,
            self.tiles.len(),
            self.total
        );
        Ok(())
    }

    /// Number of stacked tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Accumulated extent along the stacking axis
    pub fn total_extent(&self) -> u32 {
        self.total
    }

    /// Shared extent across the stacking axis, once a tile was accepted
    pub fn cross_extent(&self) -> Option<u32> {
        self.cross
    }

    /// Paint every tile at its running offset into one new image
    pub fn combine(&self) -> Result<CapturedImage, StackError> {
        let cross = match self.cross {
            Some(cross) if !self.tiles.is_empty() => cross,
            _ => return Err(StackError::Empty),
        };

        let (width, height) = match self.axis {
            StackAxis::Vertical => (cross, self.total),
            StackAxis::Horizontal => (self.total, cross),
        };
        let mut composite = RgbaImage::new(width, height);

        let mut offset: i64 = 0;
        for tile in &self.tiles {
            let (x, y) = match self.axis {
                StackAxis::Vertical => (0, offset),
                StackAxis::Horizontal => (offset, 0),
            };
            image::imageops::replace(&mut composite, tile.rgba(), x, y);
            offset += i64::from(self.axis.along(tile.dimensions()));
        }

        log::debug!(
            "Combined {} tiles into {}x{}",
            self.tiles.len(),
            width,
            height
        );
        Ok(CapturedImage::detached(composite))
    }

    /// Drop all tiles and forget the shared dimension
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.cross = None;
        self.total = 0;
    }

    /// Combine, then clear on success
    pub fn take_combined(&mut self) -> Result<CapturedImage, StackError> {
        let composite = self.combine()?;
        self.clear();
        Ok(composite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, shade: u8) -> CapturedImage {
        CapturedImage::detached(RgbaImage::from_pixel(
            width,
            height,
            Rgba([shade, shade, shade, 255]),
        ))
    }

    #[test]
    fn test_rejects_width_mismatch_without_changing_state() {
        let mut stack = ImageStack::new(StackAxis::Vertical);
        stack.add(solid(200, 50, 1)).unwrap();

        let err = stack.add(solid(199, 80, 2)).unwrap_err();
        assert_eq!(
            err,
            StackError::DimensionMismatch {
                axis: StackAxis::Vertical,
                expected: 200,
                found: 199
            }
        );
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.total_extent(), 50);
        assert_eq!(stack.cross_extent(), Some(200));
    }

    #[test]
    fn test_mismatch_message_names_the_shared_dimension() {
        let mut stack = ImageStack::new(StackAxis::Horizontal);
        stack.add(solid(30, 40, 1)).unwrap();
        let err = stack.add(solid(30, 41, 1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Image height 41 does not match the stack's 40"
        );
    }

    #[test]
    fn test_rejects_empty_image() {
        let mut stack = ImageStack::default();
        assert_eq!(stack.add(solid(0, 10, 0)), Err(StackError::EmptyImage));
        assert_eq!(stack.add(solid(10, 0, 0)), Err(StackError::EmptyImage));
        assert!(stack.is_empty());
        assert_eq!(stack.cross_extent(), None);
    }

    #[test]
    fn test_combine_vertical_places_tiles_at_offsets() {
        let mut stack = ImageStack::new(StackAxis::Vertical);
        stack.add(solid(200, 50, 10)).unwrap();
        stack.add(solid(200, 80, 20)).unwrap();
        stack.add(solid(200, 40, 30)).unwrap();

        let combined = stack.combine().unwrap();
        assert_eq!(combined.dimensions(), (200, 170));

        let px = |x, y| combined.rgba().get_pixel(x, y)[0];
        assert_eq!(px(0, 0), 10);
        assert_eq!(px(199, 49), 10);
        assert_eq!(px(0, 50), 20);
        assert_eq!(px(100, 129), 20);
        assert_eq!(px(0, 130), 30);
        assert_eq!(px(199, 169), 30);

        // combine leaves the stack untouched
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_combine_horizontal_requires_same_height() {
        let mut stack = ImageStack::new(StackAxis::Horizontal);
        stack.add(solid(30, 20, 1)).unwrap();
        assert!(stack.add(solid(30, 21, 2)).is_err());
        stack.add(solid(70, 20, 2)).unwrap();

        let combined = stack.combine().unwrap();
        assert_eq!(combined.dimensions(), (100, 20));
        assert_eq!(combined.rgba().get_pixel(29, 0)[0], 1);
        assert_eq!(combined.rgba().get_pixel(30, 19)[0], 2);
    }

    #[test]
    fn test_combine_empty_is_an_error() {
        let stack = ImageStack::default();
        assert_eq!(stack.combine(), Err(StackError::Empty));
    }

    #[test]
    fn test_clear_resets_baseline() {
        let mut stack = ImageStack::new(StackAxis::Vertical);
        stack.add(solid(200, 50, 1)).unwrap();
        stack.clear();

        assert_eq!(stack.len(), 0);
        assert_eq!(stack.total_extent(), 0);
        stack.add(solid(64, 10, 1)).unwrap();
        assert_eq!(stack.cross_extent(), Some(64));
    }

    #[test]
    fn test_take_combined_clears() {
        let mut stack = ImageStack::default();
        stack.add(solid(8, 8, 1)).unwrap();
        let combined = stack.take_combined().unwrap();
        assert_eq!(combined.dimensions(), (8, 8));
        assert!(stack.is_empty());
        assert_eq!(stack.take_combined(), Err(StackError::Empty));
    }
}
