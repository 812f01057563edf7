use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::components::{
    PickerLayout, layout_picker, render_help_popup, render_number_picker, render_tooltip,
};
use super::theme::*;
use crate::app::{App, InputMode};

/// Widest a picker frame gets
pub const PICKER_WIDTH: u16 = 30;
/// Rows per picker: a 3-row frame and a gap that also holds `Top` tooltips
pub const PICKER_ROW_HEIGHT: u16 = 4;

/// Screen areas for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub area: Rect,
    pub logo: Rect,
    pub content: Rect,
    pub status: Rect,
    pub hotkeys: Rect,
    pub pickers: Vec<PickerLayout>,
}

/// Lay out the logo, a centered column of pickers, the status line and hotkeys.
///
/// Pickers that do not fit are clipped to zero height.
pub fn compute_layout(area: Rect, picker_count: usize) -> ScreenLayout {
    let main_layout = Layout::vertical([
        Constraint::Length(2), // Logo + spacing
        Constraint::Min(0),    // Pickers
        Constraint::Length(1), // Status
        Constraint::Length(1), // Hotkeys
    ])
    .split(area);
    let content = main_layout[1];

    let width = PICKER_WIDTH.min(content.width);
    let x = content.x + (content.width - width) / 2;
    let pickers = (0..picker_count)
        .map(|i| {
            let y = content
                .y
                .saturating_add((i as u16).saturating_mul(PICKER_ROW_HEIGHT))
                .saturating_add(1);
            let frame = Rect::new(x, y, width, 3).intersection(content);
            let frame = if frame.height < 3 {
                Rect::new(frame.x, frame.y, frame.width, 0)
            } else {
                frame
            };
            layout_picker(frame)
        })
        .collect();

    ScreenLayout {
        area,
        logo: main_layout[0],
        content,
        status: main_layout[2],
        hotkeys: main_layout[3],
        pickers,
    }
}

/// Draw the app using the layout from the last `App::layout` call.
pub fn render(frame: &mut Frame, app: &App) {
    let screen = &app.screen;

    render_logo(frame, screen.logo);

    for (i, (picker, layout)) in app.pickers.iter().zip(screen.pickers.iter()).enumerate() {
        render_number_picker(frame, layout, picker, i == app.focused);
    }

    // Tooltips float over neighbouring pickers, so draw them last.
    for (picker, layout) in app.pickers.iter().zip(screen.pickers.iter()) {
        if let Some(tooltip) = picker.tooltip() {
            render_tooltip(frame, screen.area, layout, tooltip);
        }
    }

    render_status(frame, screen.status, app);
    render_hotkeys(frame, screen.hotkeys, app);

    if app.show_help {
        render_help_popup(frame, screen.area);
    }
}

fn render_logo(frame: &mut Frame, area: Rect) {
    const LOGO: &str = "numpick";
    const COLORS: [ratatui::style::Color; 4] = [LOGO_CORAL, LOGO_GOLD, LOGO_LIGHT_BLUE, LOGO_MINT];

    let padding = (area.width.saturating_sub(LOGO.len() as u16)) / 2;
    let mut spans = vec![Span::raw(" ".repeat(padding as usize))];
    spans.extend(LOGO.chars().enumerate().map(|(i, c)| {
        Span::styled(c.to_string(), Style::new().fg(COLORS[i % COLORS.len()]).bold())
    }));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(status) = &app.status {
        Line::styled(status.clone(), Style::new().fg(LOGO_GOLD))
    } else if let Some(progress) = app.global_progress {
        Line::from(vec![
            Span::styled("last change ", Style::new().fg(TEXT_DIM)),
            Span::styled(progress.to_string(), Style::new().fg(TEXT_WHITE).bold()),
        ])
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect, app: &App) {
    let hotkeys = match app.input_mode() {
        InputMode::Normal => Line::from(vec![
            Span::styled("[↑/↓]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" step • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[Tab]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" focus • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[e]", Style::new().fg(TEXT_WHITE)),
            Span::styled("dit • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[x]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" toggle • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[?]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" help • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[q]", Style::new().fg(TEXT_WHITE)),
            Span::styled("uit", Style::new().fg(TEXT_DIM)),
        ]),
        InputMode::Edit => Line::from(vec![
            Span::styled("[Enter]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" commit • ", Style::new().fg(TEXT_DIM)),
            Span::styled("[Esc]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" cancel", Style::new().fg(TEXT_DIM)),
        ]),
        InputMode::Help => Line::from(vec![
            Span::styled("[Esc]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" close", Style::new().fg(TEXT_DIM)),
        ]),
    };

    frame.render_widget(Paragraph::new(hotkeys), area);
}
