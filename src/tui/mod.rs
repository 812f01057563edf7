pub mod components;
pub mod interaction;
pub mod theme;
pub mod ui;

use std::io::Write;

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};

pub use interaction::{InteractionRegistry, PickerPart};

/// Switch to the alternate screen with mouse capture and focus reporting.
///
/// Focus reporting delivers `FocusLost`, which releases held buttons and drags.
pub fn enter_terminal_modes<W: Write>(out: &mut W) -> std::io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)
}

/// Undo `enter_terminal_modes`.
pub fn leave_terminal_modes<W: Write>(out: &mut W) -> std::io::Result<()> {
    execute!(out, DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen)
}
