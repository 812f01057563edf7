//! Help popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::theme::*;

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), Style::new().fg(TEXT_WHITE)),
        Span::styled(description, Style::new().fg(TEXT_DIM)),
    ])
}

/// Render the help popup with keyboard and mouse shortcuts.
pub fn render_help_popup(frame: &mut Frame, area: Rect) {
    let popup_width = 52u16;
    let popup_height = 27u16;
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(
        x,
        y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::new().fg(TEXT_WHITE).bold(),
        )]),
        Line::raw(""),
        Line::styled("Normal Mode", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
        key_line("↑/→ + l", "Step up"),
        key_line("↓/← - h", "Step down"),
        key_line("Tab/j", "Next picker"),
        key_line("S-Tab/k", "Previous picker"),
        key_line("1-9", "Focus picker by number"),
        key_line("e/Enter", "Type a value"),
        key_line("x", "Enable / disable picker"),
        key_line("r", "Reload config"),
        key_line("q", "Quit"),
        Line::raw(""),
        Line::styled("Edit Mode", Style::new().fg(LOGO_MINT).bold()),
        key_line("Enter", "Commit value"),
        key_line("Esc", "Discard"),
        key_line("Tab", "Commit and move on"),
        Line::raw(""),
    ];

    lines.push(Line::styled("Mouse", Style::new().fg(LOGO_GOLD).bold()));
    lines.extend([
        key_line("arrows", "Step, hold to repeat"),
        key_line("drag", "Drag the value to scrub"),
        key_line("hold", "Hold the value, then drag"),
        key_line("click", "Click the value to type"),
        key_line("wheel", "Step"),
        Line::raw(""),
    ]);

    lines.push(Line::from(vec![
        Span::styled("Press ", Style::new().fg(TEXT_DIM)),
        Span::styled("?", Style::new().fg(TEXT_WHITE)),
        Span::styled(" or ", Style::new().fg(TEXT_DIM)),
        Span::styled("Esc", Style::new().fg(TEXT_WHITE)),
        Span::styled(" to close", Style::new().fg(TEXT_DIM)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_LIGHT_BLUE))
        .style(Style::new().bg(Color::Black));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
}
