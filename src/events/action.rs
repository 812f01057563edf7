//! Action enum for decoupling input handling from state changes.
//!
//! Actions represent user intents that can be logged, replayed, or customized.

use crate::picker::StepDirection;

/// Actions that can be dispatched from event handlers.
///
/// These represent user intents and are processed by the App to update state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // === Application ===
    /// Quit the application
    Quit,
    /// Re-read the config file and apply it to the pickers
    ReloadConfig,
    /// Open help popup
    OpenHelp,
    /// Close help popup
    CloseHelp,

    // === Focus ===
    /// Focus the next picker
    FocusNext,
    /// Focus the previous picker
    FocusPrev,
    /// Focus a picker by index
    Focus(usize),
    /// Pointer pressed outside every picker
    Blur,

    // === Value changes ===
    /// Apply a single step (keyboard, wheel)
    Step { picker: usize, direction: StepDirection },
    /// Press an arrow button; repeats until released
    PressButton { picker: usize, direction: StepDirection },
    /// Enable or disable a picker
    ToggleEnabled(usize),

    // === Pointer on a value field ===
    /// Pointer pressed on a value field
    PointerDown { picker: usize, column: u16, row: u16 },
    /// Captured pointer moved
    PointerMove { column: u16, row: u16 },
    /// Captured pointer released
    PointerUp { column: u16, row: u16 },

    // === Text entry ===
    /// Start editing a picker's value
    BeginEdit(usize),
    /// Type a character into the focused field
    EditChar(char),
    /// Delete the last character of the focused field
    EditBackspace,
    /// Commit the focused field
    CommitEdit,
    /// Discard the focused field
    CancelEdit,

    /// No action
    None,
}
