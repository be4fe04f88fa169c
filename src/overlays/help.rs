use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::util::{centered_rect, render_overlay_frame, shortcut_line};
use crate::util::Shortcut;

const GLOBAL_SHORTCUTS: [(&str, &str); 4] = [
    ("F1", "Toggle Help"),
    ("C-Left/Right", "Resize"),
    ("Esc", "Quit"),
    ("C-c", "Quit"),
];

pub fn render_help_overlay(frame: &mut Frame, shortcuts: &[Shortcut]) {
    let mut lines: Vec<Line> = vec![Line::from("")];

    lines.push(section_title("Tasks"));
    lines.extend(
        shortcuts
            .iter()
            .map(|shortcut| shortcut_line(shortcut.key, shortcut.description)),
    );

    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(
        GLOBAL_SHORTCUTS
            .iter()
            .map(|(key, desc)| shortcut_line(key, desc)),
    );

    lines.push(Line::from(""));

    let content_height = lines.len() as u16 + 2;
    let overlay_width = 36u16.min(frame.area().width);
    let overlay_height = content_height.min(frame.area().height);

    let overlay_area = centered_rect(frame.area(), overlay_width, overlay_height);
    let inner = render_overlay_frame(frame, overlay_area, " Help ", Color::Cyan);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default().fg(Color::White),
    ))
}
