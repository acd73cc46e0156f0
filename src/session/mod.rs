//! Capture session messages and input mapping
//!
//! This module contains:
//! - Action and event types shared with the host toolkit
//! - Keyboard shortcut mapping

pub mod messages;
pub mod shortcuts;
