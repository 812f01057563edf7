//! Keyboard event handling by input mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode};
use crate::picker::StepDirection;

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.input_mode() {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Edit => handle_edit_mode(key),
        InputMode::Help => handle_help_mode(key),
    }
}

fn handle_normal_mode(app: &App, key: KeyEvent) -> Action {
    let picker = app.focused;
    let step = |direction| Action::Step { picker, direction };

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::OpenHelp,
        KeyCode::Char('r') => Action::ReloadConfig,

        // Focus
        KeyCode::Tab | KeyCode::Char('j') => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Char('k') => Action::FocusPrev,
        KeyCode::Char(c @ '1'..='9') => Action::Focus((c as usize) - ('1' as usize)),

        // Stepping
        KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('l') => {
            step(StepDirection::Up)
        }
        KeyCode::Down | KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => {
            step(StepDirection::Down)
        }

        // Text entry
        KeyCode::Char('e') | KeyCode::Enter => Action::BeginEdit(picker),

        KeyCode::Char('x') => Action::ToggleEnabled(picker),

        _ => Action::None,
    }
}

fn handle_edit_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::CommitEdit,
        KeyCode::Esc => Action::CancelEdit,
        KeyCode::Backspace => Action::EditBackspace,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Char(c) => Action::EditChar(c),
        _ => Action::None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseHelp,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(&[PickerConfig::default(), PickerConfig::default()], tx).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_keys() {
        let app = app();
        assert_eq!(handle_key_event(&app, key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key_event(&app, key(KeyCode::Tab)), Action::FocusNext);
        assert_eq!(handle_key_event(&app, key(KeyCode::Char('2'))), Action::Focus(1));
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Left)),
            Action::Step {
                picker: 0,
                direction: StepDirection::Down
            }
        );
        assert_eq!(handle_key_event(&app, key(KeyCode::Enter)), Action::BeginEdit(0));
        assert_eq!(handle_key_event(&app, key(KeyCode::Char('r'))), Action::ReloadConfig);
    }

    #[test]
    fn test_edit_mode_captures_characters() {
        let mut app = app();
        app.dispatch(Action::BeginEdit(0));
        assert_eq!(
            handle_key_event(&app, key(KeyCode::Char('q'))),
            Action::EditChar('q')
        );
        assert_eq!(handle_key_event(&app, key(KeyCode::Enter)), Action::CommitEdit);
        assert_eq!(handle_key_event(&app, key(KeyCode::Esc)), Action::CancelEdit);
    }

    #[test]
    fn test_help_mode_closes() {
        let mut app = app();
        app.dispatch(Action::OpenHelp);
        assert_eq!(handle_key_event(&app, key(KeyCode::Char('x'))), Action::None);
        assert_eq!(handle_key_event(&app, key(KeyCode::Esc)), Action::CloseHelp);
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let mut app = app();
        app.dispatch(Action::BeginEdit(0));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(&app, ctrl_c), Action::Quit);
    }
}
