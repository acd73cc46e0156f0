//! Drag-select rectangle over a full-screen overlay

use crate::domain::{Point, Rect, SelectionState};

/// Tracks the selection gesture and the overlay feedback derived from it
#[derive(Debug, Clone)]
pub struct RegionSelector {
    /// Area covered by the overlay, in screen coordinates
    screen: Rect,
    state: SelectionState,
    /// Overlay parts currently dimmed
    dimmed: Vec<Rect>,
}

impl RegionSelector {
    pub fn new(screen: Rect) -> Self {
        let screen = Rect::from_corners(screen.top_left(), screen.bottom_right());
        Self {
            screen,
            state: SelectionState::Idle,
            dimmed: vec![screen],
        }
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Finalized selection, if the gesture completed
    pub fn selection(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Selected(rect) => Some(rect),
            _ => None,
        }
    }

    /// Dimmed overlay regions: the screen minus the live rectangle
    pub fn dimmed_regions(&self) -> &[Rect] {
        &self.dimmed
    }

    /// Where the confirm and add buttons sit, only once a rectangle is selected
    pub fn action_anchor(&self) -> Option<Point> {
        self.selection().map(|rect| rect.bottom_right())
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.screen.left, self.screen.right),
            p.y.clamp(self.screen.top, self.screen.bottom),
        )
    }

    fn reset_mask(&mut self) {
        self.dimmed = vec![self.screen];
    }

    /// Pointer down: start a new rectangle, dropping any previous one
    pub fn press(&mut self, at: Point) {
        let at = self.clamp(at);
        if self.state.is_selected() {
            log::debug!("Discarding previous selection");
        }
        self.state = SelectionState::Dragging {
            anchor: at,
            current: at,
        };
        self.reset_mask();
    }

    /// Pointer move: follow the pointer while dragging
    pub fn drag(&mut self, to: Point) {
        let SelectionState::Dragging { anchor, .. } = self.state else {
            return;
        };
        let current = self.clamp(to);
        self.state = SelectionState::Dragging { anchor, current };

        match self.state.rect() {
            Some(rect) if rect.dimensions().is_some() => {
                self.dimmed = self.screen.subtract(rect);
            }
            _ => self.reset_mask(),
        }
    }

    /// Pointer up: keep the rectangle only if it has an area
    pub fn release(&mut self, at: Point) {
        let SelectionState::Dragging { anchor, .. } = self.state else {
            return;
        };
        let rect = Rect::from_corners(anchor, self.clamp(at));

        if rect.dimensions().is_some() {
            log::debug!("Selected {rect:?}");
            self.dimmed = self.screen.subtract(rect);
            self.state = SelectionState::Selected(rect);
        } else {
            log::debug!("Ignoring zero-extent selection at {anchor:?}");
            self.state = SelectionState::Idle;
            self.reset_mask();
        }
    }

    /// Hand over the finalized rectangle and return to idle
    pub fn take_selection(&mut self) -> Option<Rect> {
        let rect = self.selection()?;
        self.state = SelectionState::Idle;
        self.reset_mask();
        Some(rect)
    }

    /// Abandon whatever is in progress
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
        self.reset_mask();
    }
}
