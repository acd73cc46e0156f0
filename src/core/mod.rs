//! Core application module
//!
//! This module contains the top-level capture app that wires the selection
//! overlay, the capture stack and the viewer together.

pub mod app;

pub use app::CaptureApp;
