//! UI components for the TUI.
//!
//! This module organizes UI rendering into logical components.
//!
//! # Component Organization
//!
//! - `number_picker` - Bordered picker with arrow buttons and value field
//! - `tooltip` - Floating value label shown while dragging
//! - `help_popup` - Help overlay with keybindings

mod help_popup;
mod number_picker;
mod tooltip;

use ratatui::layout::{Constraint, Layout, Rect};

pub use help_popup::render_help_popup;
pub use number_picker::render_number_picker;
pub use tooltip::render_tooltip;

/// Width of an arrow button, including padding
pub const BUTTON_WIDTH: u16 = 3;

/// Screen areas of one picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerLayout {
    /// Bordered frame, including the label
    pub frame: Rect,
    pub decrement: Rect,
    pub value: Rect,
    pub increment: Rect,
}

/// Split a picker frame into `[dec] value [inc]` inside its border.
pub fn layout_picker(frame: Rect) -> PickerLayout {
    let inner = Rect::new(
        frame.x.saturating_add(1),
        frame.y.saturating_add(1),
        frame.width.saturating_sub(2),
        frame.height.saturating_sub(2).min(1),
    );
    let parts = Layout::horizontal([
        Constraint::Length(BUTTON_WIDTH),
        Constraint::Min(0),
        Constraint::Length(BUTTON_WIDTH),
    ])
    .split(inner);

    PickerLayout {
        frame,
        decrement: parts[0],
        value: parts[1],
        increment: parts[2],
    }
}
