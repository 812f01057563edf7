//! Drag tooltip component.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Clear, Paragraph},
};

use crate::picker::{Placement, Tooltip};
use crate::tui::theme::*;

use super::PickerLayout;

/// Where the tooltip lands for a picker, kept inside `screen`.
///
/// `Left` sits beside the frame and moves up as the value grows; `Top` sits
/// above it and moves right.
pub fn tooltip_area(screen: Rect, layout: &PickerLayout, tooltip: &Tooltip) -> Rect {
    let width = tooltip.width() as u16 + 2;
    let offset = tooltip.offset.round() as i32;
    let frame = layout.frame;

    let (x, y) = match tooltip.placement {
        Placement::Left => (
            i32::from(frame.x) - i32::from(width) - 1,
            i32::from(layout.value.y) - offset,
        ),
        Placement::Top => (
            i32::from(layout.value.x) + i32::from(layout.value.width / 2)
                - i32::from(width / 2)
                + offset,
            i32::from(frame.y) - 1,
        ),
    };

    let max_x = i32::from(screen.right()) - i32::from(width);
    let max_y = i32::from(screen.bottom()) - 1;
    let x = x.clamp(i32::from(screen.x), max_x.max(i32::from(screen.x)));
    let y = y.clamp(i32::from(screen.y), max_y.max(i32::from(screen.y)));

    Rect::new(x as u16, y as u16, width.min(screen.width), 1).intersection(screen)
}

pub fn render_tooltip(frame: &mut Frame, screen: Rect, layout: &PickerLayout, tooltip: &Tooltip) {
    let area = tooltip_area(screen, layout, tooltip);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            tooltip.text.clone(),
            Style::new().fg(Color::Black).bg(LOGO_GOLD).bold(),
        ))
        .style(Style::new().bg(LOGO_GOLD))
        .alignment(Alignment::Center),
        area,
    );
}
