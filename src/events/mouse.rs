//! Mouse event handling.
//!
//! Presses are resolved through the interaction registry, which the app
//! rebuilds on every layout pass. Drags and releases go to whichever picker
//! captured the press, wherever the pointer has moved since.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::picker::StepDirection;
use crate::tui::PickerPart;

use super::Action;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(app: &App, mouse: MouseEvent) -> Action {
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        MouseEventKind::ScrollUp => app.interactions.handle_scroll_up(x, y),
        MouseEventKind::ScrollDown => app.interactions.handle_scroll_down(x, y),
        MouseEventKind::Down(MouseButton::Left) => match app.interactions.hit_test(x, y) {
            Some(target) => match target.part {
                PickerPart::Decrement => Action::PressButton {
                    picker: target.picker,
                    direction: StepDirection::Down,
                },
                PickerPart::Increment => Action::PressButton {
                    picker: target.picker,
                    direction: StepDirection::Up,
                },
                PickerPart::Value => Action::PointerDown {
                    picker: target.picker,
                    column: x,
                    row: y,
                },
                PickerPart::Frame => Action::Focus(target.picker),
            },
            None => Action::Blur,
        },
        MouseEventKind::Drag(MouseButton::Left) if app.capture.is_some() => Action::PointerMove {
            column: x,
            row: y,
        },
        MouseEventKind::Up(MouseButton::Left) if app.capture.is_some() => {
            Action::PointerUp { column: x, row: y }
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&[PickerConfig::default()], tx).unwrap();
        app.layout(Rect::new(0, 0, 80, 40));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_press_on_parts() {
        let app = app();
        let layout = app.screen.pickers[0];
        let down = MouseEventKind::Down(MouseButton::Left);

        assert_eq!(
            handle_mouse_event(&app, mouse(down, layout.decrement.x, layout.decrement.y)),
            Action::PressButton {
                picker: 0,
                direction: StepDirection::Down
            }
        );
        assert_eq!(
            handle_mouse_event(&app, mouse(down, layout.increment.x, layout.increment.y)),
            Action::PressButton {
                picker: 0,
                direction: StepDirection::Up
            }
        );
        assert_eq!(
            handle_mouse_event(&app, mouse(down, layout.value.x, layout.value.y)),
            Action::PointerDown {
                picker: 0,
                column: layout.value.x,
                row: layout.value.y
            }
        );
        assert_eq!(
            handle_mouse_event(&app, mouse(down, layout.frame.x, layout.frame.y)),
            Action::Focus(0)
        );
        assert_eq!(handle_mouse_event(&app, mouse(down, 79, 39)), Action::Blur);
    }

    #[test]
    fn test_drag_without_capture_is_ignored() {
        let app = app();
        let drag = MouseEventKind::Drag(MouseButton::Left);
        assert_eq!(handle_mouse_event(&app, mouse(drag, 5, 5)), Action::None);
        let up = MouseEventKind::Up(MouseButton::Left);
        assert_eq!(handle_mouse_event(&app, mouse(up, 5, 5)), Action::None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_follows_capture_outside_picker() {
        let mut app = app();
        let value = app.screen.pickers[0].value;
        let press = handle_mouse_event(
            &app,
            mouse(MouseEventKind::Down(MouseButton::Left), value.x, value.y),
        );
        app.dispatch(press);

        let drag = MouseEventKind::Drag(MouseButton::Left);
        assert_eq!(
            handle_mouse_event(&app, mouse(drag, 79, 0)),
            Action::PointerMove { column: 79, row: 0 }
        );
    }

    #[test]
    fn test_scroll_over_picker_steps() {
        let app = app();
        let frame = app.screen.pickers[0].frame;
        assert_eq!(
            handle_mouse_event(&app, mouse(MouseEventKind::ScrollUp, frame.x, frame.y)),
            Action::Step {
                picker: 0,
                direction: StepDirection::Up
            }
        );
        assert_eq!(
            handle_mouse_event(&app, mouse(MouseEventKind::ScrollDown, 79, 39)),
            Action::None
        );
    }
}
