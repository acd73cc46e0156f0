//! Pure domain types with minimal dependencies
//!
//! Types here carry no platform or toolkit dependencies so the capture,
//! render and widget layers can all share them.

pub mod annotation;
pub mod geometry;
pub mod selection;

pub use annotation::*;
pub use geometry::*;
pub use selection::*;
