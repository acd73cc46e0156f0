use crate::session::messages::{OverlayAction, ViewAction};

/// Keys the core reacts to, translated by the host from toolkit events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        control: true,
        shift: false,
        alt: false,
    };

    /// Ctrl held without Alt; Shift is allowed so `+` works on layouts that need it
    pub fn control(&self) -> bool {
        self.control && !self.alt
    }

    /// Ctrl alone, for letter shortcuts
    pub fn control_only(&self) -> bool {
        self.control() && !self.shift
    }
}

/// Map a key press in the viewer to an action
pub fn handle_view_key(key: Key, modifiers: Modifiers) -> Option<ViewAction> {
    match key {
        // Ctrl+C/S/T mirror the copy, save and pin buttons
        Key::Character(c) if c.eq_ignore_ascii_case(&'c') && modifiers.control_only() => {
            Some(ViewAction::Copy)
        }
        Key::Character(c) if c.eq_ignore_ascii_case(&'s') && modifiers.control_only() => {
            Some(ViewAction::Save)
        }
        Key::Character(c) if c.eq_ignore_ascii_case(&'t') && modifiers.control_only() => {
            Some(ViewAction::ToggleOnTop)
        }
        // Zoom shortcuts; '=' is '+' without shift on most layouts
        Key::Character('+' | '=') if modifiers.control() => Some(ViewAction::ZoomIn),
        Key::Character('-') if modifiers.control() => Some(ViewAction::ZoomOut),
        Key::Character('0') if modifiers.control() => Some(ViewAction::ResetZoom),
        Key::Escape => Some(ViewAction::Reset),
        _ => None,
    }
}

/// Map a key press on the selection overlay to an action
pub fn handle_overlay_key(
    key: Key,
    modifiers: Modifiers,
    has_selection: bool,
) -> Option<OverlayAction> {
    match key {
        Key::Escape => Some(OverlayAction::Cancel),
        Key::Enter if has_selection => Some(OverlayAction::confirm()),
        Key::Character('a') if modifiers == Modifiers::NONE && has_selection => {
            Some(OverlayAction::add_to_stack())
        }
        _ => None,
    }
}
