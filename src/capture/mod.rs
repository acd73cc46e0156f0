//! Captured images and capture stacking
//!
//! This module consolidates:
//! - Captured image type (image.rs)
//! - Multi-capture stacking into a composite (stack.rs)

pub mod image;
pub mod stack;

pub use self::image::CapturedImage;
pub use self::stack::{ImageStack, StackError};
