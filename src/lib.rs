//! Region screenshots, capture stacking and an annotation viewer
//!
//! The crate is the toolkit-independent core of a screen-capture tool. A host
//! GUI feeds pointer and key input into [`CaptureApp`] and implements the
//! window hooks in [`platform`]; the core decides what to grab, stack, show,
//! copy and save.

pub mod capture;
pub mod config;
pub mod core;
pub mod domain;
pub mod platform;
pub mod render;
pub mod screenshot;
pub mod session;
pub mod widget;

pub use crate::capture::{CapturedImage, ImageStack, StackError};
pub use crate::config::Config;
pub use crate::core::CaptureApp;
pub use crate::platform::{ClipboardSink, Platform, ScreenGrabber, WindowHost};
pub use crate::widget::{ImageView, RegionSelector};

/// Install the env_logger backend, defaulting to `warn`
///
/// Hosts call this once at startup; `RUST_LOG` overrides the filter.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
