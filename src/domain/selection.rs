//! Selection types for the region overlay

use super::geometry::{Point, Rect};

/// Phase of the drag-select gesture
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No gesture in progress and nothing selected
    #[default]
    Idle,
    /// Pointer is held; the rectangle follows the pointer
    Dragging { anchor: Point, current: Point },
    /// Pointer released on a rectangle with nonzero extent
    Selected(Rect),
}

impl SelectionState {
    /// Rectangle currently shown on screen, if any
    pub fn rect(&self) -> Option<Rect> {
        match *self {
            SelectionState::Idle => None,
            SelectionState::Dragging { anchor, current } => {
                Some(Rect::from_corners(anchor, current))
            }
            SelectionState::Selected(rect) => Some(rect),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionState::Selected(_))
    }
}

/// Action buttons shown at the corner of a finished selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    /// Grab the region and open the viewer
    Confirm,
    /// Grab the region and push it onto the stack
    AddToStack,
}

/// Axis along which stacked captures are concatenated
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
pub enum StackAxis {
    /// Tiles go top to bottom and must share a width
    #[default]
    Vertical,
    /// Tiles go left to right and must share a height
    Horizontal,
}

impl StackAxis {
    /// Extent of a `(width, height)` pair along the stacking axis
    pub fn along(self, (width, height): (u32, u32)) -> u32 {
        match self {
            StackAxis::Vertical => height,
            StackAxis::Horizontal => width,
        }
    }

    /// Extent of a `(width, height)` pair across the stacking axis
    pub fn across(self, (width, height): (u32, u32)) -> u32 {
        match self {
            StackAxis::Vertical => width,
            StackAxis::Horizontal => height,
        }
    }

    /// Name of the dimension that must match between tiles
    pub fn cross_name(self) -> &'static str {
        match self {
            StackAxis::Vertical => "width",
            StackAxis::Horizontal => "height",
        }
    }
}
