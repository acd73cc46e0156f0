//! Interactive pieces driven by host input events
//!
//! - Region selection overlay (region_selector.rs)
//! - Zoomable annotation viewer (image_view.rs)

pub mod image_view;
pub mod region_selector;

pub use image_view::ImageView;
pub use region_selector::RegionSelector;
