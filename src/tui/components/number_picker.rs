//! Number picker component.

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::picker::{NumberPicker, Orientation, StepDirection, TrackerKind};
use crate::tui::theme::*;

use super::PickerLayout;

/// Arrow glyphs for `(decrement, increment)`.
fn arrows(orientation: Orientation) -> (&'static str, &'static str) {
    match orientation {
        Orientation::Vertical => ("▼", "▲"),
        Orientation::Horizontal => ("◀", "▶"),
    }
}

/// Render a picker into its laid-out areas.
pub fn render_number_picker(
    frame: &mut Frame,
    layout: &PickerLayout,
    picker: &NumberPicker,
    focused: bool,
) {
    if layout.frame.height == 0 {
        return;
    }

    let enabled = picker.is_enabled();
    let border_color = if !enabled {
        TEXT_DIM
    } else if focused {
        LOGO_LIGHT_BLUE
    } else {
        TEXT_DIM
    };

    let mut title = vec![Span::styled(
        format!(" {} ", picker.label()),
        Style::new().fg(if focused { TEXT_WHITE } else { TEXT_DIM }),
    )];
    if !enabled {
        title.push(Span::styled("(disabled) ", Style::new().fg(LOGO_CORAL)));
    }

    // Range and input hints along the bottom border
    let model = picker.model();
    let mut hint = format!(" {}..{}", model.min_value(), model.max_value());
    if model.step_size() > 1 {
        hint.push_str(&format!(" by {}", model.step_size()));
    }
    hint.push_str(match (picker.gestures_enabled(), picker.tracker_kind()) {
        (false, _) => " · type ",
        (true, TrackerKind::Linear) => " · drag ",
        (true, TrackerKind::Exponential) => " · hold ",
    });

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(border_color))
        .title(Line::from(title))
        .title_bottom(Line::styled(hint, Style::new().fg(TEXT_DIM)).right_aligned());
    frame.render_widget(block, layout.frame);

    let (dec, inc) = arrows(picker.orientation());
    let button_style = |direction| {
        if !enabled {
            Style::new().fg(TEXT_DIM)
        } else if picker.pressed() == Some(direction) {
            Style::new().fg(LOGO_GOLD).add_modifier(Modifier::REVERSED)
        } else {
            Style::new().fg(TEXT_WHITE)
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(dec, button_style(StepDirection::Down)))
            .alignment(Alignment::Center),
        layout.decrement,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(inc, button_style(StepDirection::Up)))
            .alignment(Alignment::Center),
        layout.increment,
    );

    // The tooltip carries the value while dragging.
    let value_style = if !enabled || picker.is_tracking() {
        Style::new().fg(TEXT_DIM)
    } else if picker.is_editing() {
        Style::new().fg(LOGO_MINT).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::new().fg(TEXT_WHITE).bold()
    };

    let mut spans = vec![Span::styled(picker.display_text(), value_style)];
    if picker.is_editing() {
        spans.push(Span::styled("▏", Style::new().fg(LOGO_MINT)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        layout.value,
    );
}
