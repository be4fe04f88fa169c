use ratatui::{
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
};

pub fn panel_block(title: &str, highlighted: bool) -> Block<'_> {
    let color = if highlighted {
        Color::Cyan
    } else {
        Color::Gray
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(title)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHandleResult {
    Consumed,
    Ignored,
    /// The task list was mutated and should be persisted
    Changed,
    /// A non-blank task was marked done
    Completed,
}
