//! Message types exchanged between the host toolkit and the core
//!
//! This module contains:
//! - Actions the host triggers from buttons or shortcuts
//! - Events the core queues for the host to react to

use std::path::PathBuf;

use crate::capture::StackError;
use crate::domain::{DrawMode, SelectionAction};

/// Viewer toolbar and shortcut actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Copy,
    Save,
    ToggleOnTop,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    /// Pick a shape kind to draw
    Draw(DrawMode),
    /// Back to pan interaction
    Reset,
}

/// Selection overlay actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// One of the buttons at the selection corner
    Selection(SelectionAction),
    /// Drop the current selection
    Cancel,
}

impl OverlayAction {
    pub fn confirm() -> Self {
        OverlayAction::Selection(SelectionAction::Confirm)
    }

    pub fn add_to_stack() -> Self {
        OverlayAction::Selection(SelectionAction::AddToStack)
    }
}

/// Notifications from the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Scale changed to the carried value
    ZoomChanged(f32),
    DrawModeChanged(DrawMode),
    Copied,
    Saved(PathBuf),
    OnTopChanged(bool),
}

/// Notifications from the capture app
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A grab was pushed onto the stack, which now holds `len` tiles
    Stacked { len: usize },
    /// A grab was refused by the stack; the host decides how to tell the user
    StackRejected(StackError),
    /// The viewer now shows an image of this size
    Shown { width: u32, height: u32 },
}
