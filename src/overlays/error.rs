use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::util::{centered_rect, render_overlay_frame};

pub fn render_error_overlay(frame: &mut Frame, message: &str) {
    let overlay_width = 44u16.min(frame.area().width);
    let text_width = overlay_width.saturating_sub(6).max(1) as usize;

    let msg_lines = message.chars().count().div_ceil(text_width).max(1);
    // pad, message, pad, hint, borders
    let content_height = (msg_lines + 3) as u16 + 2;
    let overlay_height = content_height.min(frame.area().height);

    let overlay_area = centered_rect(frame.area(), overlay_width, overlay_height);
    let inner = render_overlay_frame(frame, overlay_area, " Error ", Color::Red);

    let [_, msg_row, _, hint_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(msg_lines as u16),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let msg = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
        .wrap(Wrap { trim: true });
    frame.render_widget(msg, indented(msg_row));

    let hint = Paragraph::new(Span::styled(
        "Press any key to dismiss",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(hint, indented(hint_row));
}

fn indented(row: Rect) -> Rect {
    Rect {
        x: row.x + 2,
        width: row.width.saturating_sub(4),
        ..row
    }
}
