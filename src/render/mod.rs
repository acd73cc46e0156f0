//! Scene rendering module
//!
//! This module contains:
//! - Geometry constants shared by hit testing and rasterization
//! - Image rendering using tiny-skia (for saving to file)

pub mod geometry;
pub mod image;

pub use self::image::{SceneOptions, render_scene};
