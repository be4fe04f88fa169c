use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::field::{FieldCursor, FieldEdit};
use super::util::{panel_block, KeyHandleResult};
use crate::task_list::{TaskList, SLOT_COUNT};
use crate::util::Shortcut;

/// Text rows plus separators plus the outer border
pub const PANEL_HEIGHT: u16 = (SLOT_COUNT * 2 - 1) as u16 + 2;

/// Columns reserved in front of the text for the focus/drop marker
const GUTTER: u16 = 2;
const HANDLE_WIDTH: u16 = 3;
const DONE_WIDTH: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    source: usize,
    /// Row under the pointer, `None` when outside the list
    hover: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct RowLayout {
    field: Rect,
    handle: Rect,
    done: Rect,
}

pub struct TasksPanel {
    focus: usize,
    cursor: FieldCursor,
    placeholder: &'static str,
    drag: Option<DragState>,
    pointer_row: Option<usize>,
    /// Geometry of the last rendered frame, used for mouse hit-testing
    list_area: Rect,
    rows: [RowLayout; SLOT_COUNT],
}

impl TasksPanel {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            focus: 0,
            cursor: FieldCursor::default(),
            placeholder,
            drag: None,
            pointer_row: None,
            list_area: Rect::default(),
            rows: [RowLayout::default(); SLOT_COUNT],
        }
    }

    #[cfg(test)]
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, tasks: &TaskList) {
        let block = panel_block(" Tasks ", self.drag.is_some()).title_bottom(
            Line::from(Span::styled(
                " [F1] Help ",
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );

        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.list_area = inner;
        let (rows, separators) = row_layouts(inner);
        self.rows = rows;

        for separator in separators {
            let line = Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray));
            frame.render_widget(line, separator);
        }

        for (index, row) in self.rows.iter().enumerate() {
            self.render_row(frame, index, *row, tasks);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, tasks: &mut TaskList) -> KeyHandleResult {
        if self.drag.is_some() {
            if key.code == KeyCode::Esc {
                tracing::debug!("drag cancelled");
                self.drag = None;
            }
            return KeyHandleResult::Consumed;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Enter if ctrl => self.complete(self.focus, tasks),
            KeyCode::Char('d') if ctrl => self.complete(self.focus, tasks),
            KeyCode::Enter if shift => {
                self.focus_previous(tasks);
                KeyHandleResult::Consumed
            }
            KeyCode::Enter => {
                self.focus_next(tasks);
                KeyHandleResult::Consumed
            }
            KeyCode::Up if alt => self.shift_focused(tasks, true),
            KeyCode::Down if alt => self.shift_focused(tasks, false),
            KeyCode::Tab if shift => {
                self.focus_previous(tasks);
                KeyHandleResult::Consumed
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_previous(tasks);
                KeyHandleResult::Consumed
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next(tasks);
                KeyHandleResult::Consumed
            }
            _ => {
                let text = tasks.get(self.focus).unwrap_or_default();
                match self.cursor.apply(text, key) {
                    FieldEdit::Changed(text) => {
                        tasks.set_slot(self.focus, text);
                        KeyHandleResult::Changed
                    }
                    FieldEdit::Moved => KeyHandleResult::Consumed,
                    FieldEdit::Unhandled => KeyHandleResult::Ignored,
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, tasks: &mut TaskList) -> KeyHandleResult {
        let pos = Position::new(event.column, event.row);

        match event.kind {
            MouseEventKind::Moved => {
                self.pointer_row = self.row_at(pos);
                KeyHandleResult::Consumed
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.row_at(pos) else {
                    return KeyHandleResult::Ignored;
                };
                self.pointer_row = Some(index);
                let row = self.rows[index];

                if row.handle.contains(pos) && self.handle_visible(index, tasks) {
                    tracing::debug!(source = index, "drag started");
                    self.drag = Some(DragState {
                        source: index,
                        hover: Some(index),
                    });
                    KeyHandleResult::Consumed
                } else if row.done.contains(pos) && self.done_visible(index, tasks) {
                    self.complete(index, tasks)
                } else {
                    let text = tasks.get(index).unwrap_or_default();
                    let width = row.field.width.saturating_sub(GUTTER) as usize;
                    let scroll = if index == self.focus {
                        scroll_offset(text, self.cursor.position(), width)
                    } else {
                        0
                    };
                    let column = pos.x.saturating_sub(row.field.x + GUTTER) as usize;
                    self.focus = index;
                    self.cursor.set(text, char_at_column(text, scroll, column));
                    KeyHandleResult::Consumed
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let hover = self.row_at(pos);
                match self.drag.as_mut() {
                    Some(drag) => {
                        drag.hover = hover;
                        KeyHandleResult::Consumed
                    }
                    None => KeyHandleResult::Ignored,
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return KeyHandleResult::Ignored;
                };
                let destination = self.row_at(pos);
                self.pointer_row = destination;

                match tasks.reorder(drag.source, destination) {
                    Some(landed) => {
                        tracing::debug!(source = drag.source, ?destination, landed, "drag dropped");
                        self.focus_on(landed, tasks);
                        KeyHandleResult::Changed
                    }
                    None => {
                        tracing::debug!(source = drag.source, "drag released outside list");
                        KeyHandleResult::Consumed
                    }
                }
            }
            _ => KeyHandleResult::Ignored,
        }
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut {
                key: "Enter",
                description: "Next task",
            },
            Shortcut {
                key: "S-Enter",
                description: "Previous task",
            },
            Shortcut {
                key: "C-Enter",
                description: "Done",
            },
            Shortcut {
                key: "C-d",
                description: "Done",
            },
            Shortcut {
                key: "A-Up/Dn",
                description: "Move task",
            },
            Shortcut {
                key: "Drag ⠿",
                description: "Reorder",
            },
        ]
    }

    // -- Store operations --

    fn complete(&mut self, index: usize, tasks: &mut TaskList) -> KeyHandleResult {
        let was_blank = tasks.is_blank(index);
        let was_empty = tasks.get(index).is_none_or(str::is_empty);

        tasks.clear_slot(index);
        if index == self.focus {
            self.cursor.set("", 0);
        }

        if !was_blank {
            tracing::debug!(index, "task completed");
            KeyHandleResult::Completed
        } else if !was_empty {
            KeyHandleResult::Changed
        } else {
            KeyHandleResult::Consumed
        }
    }

    fn shift_focused(&mut self, tasks: &mut TaskList, up: bool) -> KeyHandleResult {
        if tasks.is_blank(self.focus) || tasks.filled_count() < 2 {
            return KeyHandleResult::Consumed;
        }
        let destination = if up {
            self.focus.checked_sub(1)
        } else {
            Some(self.focus + 1).filter(|d| *d < SLOT_COUNT)
        };
        let Some(destination) = destination else {
            return KeyHandleResult::Consumed;
        };

        match tasks.reorder(self.focus, Some(destination)) {
            Some(landed) => {
                self.focus_on(landed, tasks);
                KeyHandleResult::Changed
            }
            None => KeyHandleResult::Consumed,
        }
    }

    // -- Focus/navigation methods --

    fn focus_on(&mut self, index: usize, tasks: &TaskList) {
        self.focus = index.min(SLOT_COUNT - 1);
        self.cursor
            .move_to_end(tasks.get(self.focus).unwrap_or_default());
    }

    fn focus_previous(&mut self, tasks: &TaskList) {
        if self.focus > 0 {
            self.focus_on(self.focus - 1, tasks);
        }
    }

    fn focus_next(&mut self, tasks: &TaskList) {
        if self.focus + 1 < SLOT_COUNT {
            self.focus_on(self.focus + 1, tasks);
        }
    }

    /// Row under `pos`; separator lines belong to the row above them
    fn row_at(&self, pos: Position) -> Option<usize> {
        if !self.list_area.contains(pos) {
            return None;
        }
        let offset = (pos.y - self.list_area.y) as usize / 2;
        Some(offset.min(SLOT_COUNT - 1))
    }

    fn handle_visible(&self, index: usize, tasks: &TaskList) -> bool {
        if tasks.is_blank(index) || tasks.filled_count() < 2 {
            return false;
        }
        match self.drag {
            Some(drag) => drag.source == index,
            None => index == self.focus || self.pointer_row == Some(index),
        }
    }

    fn done_visible(&self, index: usize, tasks: &TaskList) -> bool {
        self.drag.is_none()
            && !tasks.is_blank(index)
            && (index == self.focus || self.pointer_row == Some(index))
    }

    // -- Rendering helpers --

    fn placeholder_for(&self, index: usize) -> String {
        if index == 0 {
            self.placeholder.to_string()
        } else {
            format!("task-{}", index + 1)
        }
    }

    fn render_row(&self, frame: &mut Frame, index: usize, row: RowLayout, tasks: &TaskList) {
        let text = tasks.get(index).unwrap_or_default();
        let editing = index == self.focus && self.drag.is_none();
        let dragged = self.drag.is_some_and(|d| d.source == index);
        let drop_target = self
            .drag
            .is_some_and(|d| d.source != index && d.hover == Some(index));

        let marker = if drop_target {
            Span::styled("▸ ", Style::default().fg(Color::Yellow))
        } else if dragged || editing {
            Span::styled("> ", Style::default().fg(Color::Cyan))
        } else {
            Span::raw("  ")
        };

        let text_width = row.field.width.saturating_sub(GUTTER) as usize;
        let content = if text.is_empty() {
            Span::styled(
                self.placeholder_for(index),
                Style::default().fg(Color::DarkGray),
            )
        } else if editing {
            let scroll = scroll_offset(text, self.cursor.position(), text_width);
            let visible = fit_width(text.chars().skip(scroll), text_width);
            Span::styled(visible, Style::default().fg(Color::White))
        } else if dragged {
            Span::styled(
                truncate_with_ellipsis(text, text_width),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                truncate_with_ellipsis(text, text_width),
                Style::default().fg(Color::Gray),
            )
        };

        frame.render_widget(Paragraph::new(Line::from(vec![marker, content])), row.field);

        if self.handle_visible(index, tasks) {
            let handle = Paragraph::new("⠿")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(handle, row.handle);
        }

        if self.done_visible(index, tasks) {
            let done = Paragraph::new("done?")
                .style(Style::default().fg(Color::Black).bg(Color::LightBlue))
                .alignment(Alignment::Center);
            frame.render_widget(done, row.done);
        }

        if editing {
            let cursor = self.cursor.position();
            let scroll = scroll_offset(text, cursor, text_width);
            let before: usize = text
                .chars()
                .skip(scroll)
                .take(cursor.saturating_sub(scroll))
                .map(char_width)
                .sum();
            let cursor_x = row.field.x + GUTTER + before as u16;
            if cursor_x < row.field.x + row.field.width {
                frame.set_cursor_position((cursor_x, row.field.y));
            }
        }
    }
}

/// Split the list area into one row per slot and the separator lines between
/// them.
fn row_layouts(inner: Rect) -> ([RowLayout; SLOT_COUNT], Vec<Rect>) {
    let constraints = (0..SLOT_COUNT * 2 - 1).map(|_| Constraint::Length(1));
    let chunks = Layout::vertical(constraints).split(inner);

    let rows = std::array::from_fn(|i| {
        let [field, handle, done] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(HANDLE_WIDTH),
            Constraint::Length(DONE_WIDTH),
        ])
        .areas(chunks[i * 2]);
        RowLayout {
            field,
            handle,
            done,
        }
    });
    let separators = chunks.iter().skip(1).step_by(2).copied().collect();

    (rows, separators)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// First visible character so that the cursor stays inside `width` columns
fn scroll_offset(text: &str, cursor: usize, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let chars: Vec<char> = text.chars().collect();
    let mut start = cursor.min(chars.len());
    let mut used = 0;
    // One column stays free for the cursor itself
    while start > 0 {
        let w = char_width(chars[start - 1]);
        if used + w > width - 1 {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}

/// Longest prefix of `chars` that fits in `max_width` columns
fn fit_width(chars: impl Iterator<Item = char>, max_width: usize) -> String {
    let mut used = 0;
    chars
        .take_while(|c| {
            let w = char_width(*c);
            if used + w > max_width {
                return false;
            }
            used += w;
            true
        })
        .collect()
}

/// Character index under `column`, counting from the first visible character
fn char_at_column(text: &str, scroll: usize, column: usize) -> usize {
    let mut used = 0;
    let skipped = text
        .chars()
        .skip(scroll)
        .take_while(|c| {
            let w = char_width(*c);
            if used + w > column {
                return false;
            }
            used += w;
            true
        })
        .count();
    scroll + skipped
}

fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut result = fit_width(text.chars(), max_width - 1);
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    const WIDTH: u16 = 40;

    fn list(values: &[&str]) -> TaskList {
        TaskList::from(values.iter().map(|v| (*v).to_string()).collect::<Vec<_>>())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Render once so the panel knows its row geometry; returns the screen text
    fn render(panel: &mut TasksPanel, tasks: &TaskList) -> Vec<String> {
        let area = Rect::new(0, 0, WIDTH, PANEL_HEIGHT);
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, PANEL_HEIGHT)).unwrap();
        terminal.draw(|frame| panel.render(frame, area, tasks)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..PANEL_HEIGHT)
            .map(|y| {
                (0..WIDTH)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    /// Render once and report where the terminal cursor was placed
    fn render_cursor(panel: &mut TasksPanel, tasks: &TaskList) -> Position {
        let area = Rect::new(0, 0, WIDTH, PANEL_HEIGHT);
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, PANEL_HEIGHT)).unwrap();
        terminal.draw(|frame| panel.render(frame, area, tasks)).unwrap();
        terminal.get_cursor_position().unwrap()
    }

    /// Screen row of slot `index` (inside the border, one separator between rows)
    fn slot_y(index: usize) -> u16 {
        1 + 2 * index as u16
    }

    // Inner width 38: field 28 columns, handle 3, done 7
    const HANDLE_X: u16 = 30;
    const DONE_X: u16 = 34;

    #[test]
    fn plain_enter_moves_focus_down_and_stops_at_last() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = TaskList::default();
        for expected in [1, 2, 3, 4, 4] {
            let result = panel.handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &mut tasks);
            assert_eq!(result, KeyHandleResult::Consumed);
            assert_eq!(panel.focus(), expected);
        }
    }

    #[test]
    fn shift_enter_moves_focus_up_and_stops_at_first() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = TaskList::default();
        panel.handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &mut tasks);
        panel.handle_key(key(KeyCode::Enter, KeyModifiers::SHIFT), &mut tasks);
        assert_eq!(panel.focus(), 0);
        panel.handle_key(key(KeyCode::Enter, KeyModifiers::SHIFT), &mut tasks);
        assert_eq!(panel.focus(), 0);
    }

    #[test]
    fn ctrl_enter_completes_focused_task_without_compacting() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "b", "", "", ""]);
        let result = panel.handle_key(key(KeyCode::Enter, KeyModifiers::CONTROL), &mut tasks);
        assert_eq!(result, KeyHandleResult::Completed);
        assert_eq!(tasks, list(&["", "b", "", "", ""]));
    }

    #[test]
    fn completing_an_empty_slot_is_not_a_completion() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = TaskList::default();
        let result = panel.handle_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL), &mut tasks);
        assert_eq!(result, KeyHandleResult::Consumed);
    }

    #[test]
    fn typing_edits_the_focused_slot() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = TaskList::default();
        panel.handle_key(key(KeyCode::Down, KeyModifiers::NONE), &mut tasks);
        for c in "hi".chars() {
            let result = panel.handle_key(key(KeyCode::Char(c), KeyModifiers::NONE), &mut tasks);
            assert_eq!(result, KeyHandleResult::Changed);
        }
        assert_eq!(tasks, list(&["", "hi", "", "", ""]));
    }

    #[test]
    fn alt_arrows_move_the_focused_task() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "b", "c", "", ""]);

        let result = panel.handle_key(key(KeyCode::Down, KeyModifiers::ALT), &mut tasks);
        assert_eq!(result, KeyHandleResult::Changed);
        assert_eq!(tasks, list(&["b", "a", "c", "", ""]));
        assert_eq!(panel.focus(), 1);

        panel.handle_key(key(KeyCode::Up, KeyModifiers::ALT), &mut tasks);
        panel.handle_key(key(KeyCode::Up, KeyModifiers::ALT), &mut tasks);
        assert_eq!(tasks, list(&["a", "b", "c", "", ""]));
        assert_eq!(panel.focus(), 0);
    }

    #[test]
    fn renders_placeholders_and_done_button() {
        let mut panel = TasksPanel::new("plan the day");
        let tasks = list(&["", "b", "", "", ""]);
        let screen = render(&mut panel, &tasks);

        assert!(screen[slot_y(0) as usize].contains("plan the day"));
        assert!(screen[slot_y(2) as usize].contains("task-3"));
        // Focused row is blank, so no done button anywhere
        assert!(!screen.iter().any(|line| line.contains("done?")));

        panel.handle_key(key(KeyCode::Down, KeyModifiers::NONE), &mut tasks.clone());
        let screen = render(&mut panel, &tasks);
        assert!(screen[slot_y(1) as usize].contains("done?"));
    }

    #[test]
    fn drag_handle_requires_two_filled_tasks() {
        let mut panel = TasksPanel::new("ph");
        let tasks = list(&["a", "", "", "", ""]);
        let screen = render(&mut panel, &tasks);
        assert!(!screen[slot_y(0) as usize].contains('⠿'));

        let tasks = list(&["a", "b", "", "", ""]);
        let screen = render(&mut panel, &tasks);
        assert!(screen[slot_y(0) as usize].contains('⠿'));
    }

    #[test]
    fn mouse_drag_reorders_and_compacts() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "b", "", "", ""]);
        render(&mut panel, &tasks);

        let down = mouse(MouseEventKind::Down(MouseButton::Left), HANDLE_X, slot_y(0));
        assert_eq!(panel.handle_mouse(down, &mut tasks), KeyHandleResult::Consumed);

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 5, slot_y(2));
        assert_eq!(panel.handle_mouse(drag, &mut tasks), KeyHandleResult::Consumed);

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 5, slot_y(2));
        assert_eq!(panel.handle_mouse(up, &mut tasks), KeyHandleResult::Changed);

        assert_eq!(tasks, list(&["b", "a", "", "", ""]));
        assert_eq!(panel.focus(), 1);
    }

    #[test]
    fn drop_onto_first_row_moves_to_front() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "b", "c", "d", "e"]);
        panel.handle_key(key(KeyCode::Tab, KeyModifiers::NONE), &mut tasks);
        for _ in 0..3 {
            panel.handle_key(key(KeyCode::Down, KeyModifiers::NONE), &mut tasks);
        }
        render(&mut panel, &tasks);

        panel.handle_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), HANDLE_X, slot_y(4)),
            &mut tasks,
        );
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 5, slot_y(0));
        assert_eq!(panel.handle_mouse(up, &mut tasks), KeyHandleResult::Changed);

        assert_eq!(tasks, list(&["e", "a", "b", "c", "d"]));
        assert_eq!(panel.focus(), 0);
    }

    #[test]
    fn release_outside_the_list_cancels_the_drag() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "", "b", "", ""]);
        render(&mut panel, &tasks);

        panel.handle_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), HANDLE_X, slot_y(0)),
            &mut tasks,
        );
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 60, 30);
        assert_eq!(panel.handle_mouse(up, &mut tasks), KeyHandleResult::Consumed);
        assert_eq!(tasks, list(&["a", "", "b", "", ""]));
    }

    #[test]
    fn escape_cancels_an_active_drag() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "b", "", "", ""]);
        render(&mut panel, &tasks);

        panel.handle_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), HANDLE_X, slot_y(0)),
            &mut tasks,
        );
        let esc = panel.handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &mut tasks);
        assert_eq!(esc, KeyHandleResult::Consumed);

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 5, slot_y(3));
        assert_eq!(panel.handle_mouse(up, &mut tasks), KeyHandleResult::Ignored);
        assert_eq!(tasks, list(&["a", "b", "", "", ""]));
    }

    #[test]
    fn clicking_done_completes_that_row() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "b", "", "", ""]);
        render(&mut panel, &tasks);

        let click = mouse(MouseEventKind::Down(MouseButton::Left), DONE_X, slot_y(0));
        assert_eq!(panel.handle_mouse(click, &mut tasks), KeyHandleResult::Completed);
        assert_eq!(tasks, list(&["", "b", "", "", ""]));
    }

    #[test]
    fn clicking_a_field_focuses_it_at_the_clicked_column() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "", "hello", "", ""]);
        render(&mut panel, &tasks);

        // Text starts after the border and the gutter
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 1 + GUTTER + 2, slot_y(2));
        panel.handle_mouse(click, &mut tasks);
        assert_eq!(panel.focus(), 2);

        panel.handle_key(key(KeyCode::Char('X'), KeyModifiers::SHIFT), &mut tasks);
        assert_eq!(tasks.get(2), Some("heXllo"));
    }

    #[test]
    fn cursor_sits_after_wide_characters() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = TaskList::default();
        for c in "日本語".chars() {
            panel.handle_key(key(KeyCode::Char(c), KeyModifiers::NONE), &mut tasks);
        }
        // Border, gutter, then three double-width characters
        assert_eq!(
            render_cursor(&mut panel, &tasks),
            Position::new(1 + GUTTER + 6, slot_y(0))
        );

        panel.handle_key(key(KeyCode::Left, KeyModifiers::NONE), &mut tasks);
        assert_eq!(
            render_cursor(&mut panel, &tasks),
            Position::new(1 + GUTTER + 4, slot_y(0))
        );
    }

    #[test]
    fn long_wide_text_scrolls_inside_the_field() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = TaskList::default();
        for _ in 0..20 {
            panel.handle_key(key(KeyCode::Char('日'), KeyModifiers::NONE), &mut tasks);
        }
        let cursor = render_cursor(&mut panel, &tasks);
        // Field spans columns 1..29; 12 characters fit before the cursor
        assert_eq!(cursor.x, 1 + GUTTER + 24);
        assert_eq!(scroll_offset(tasks.get(0).unwrap(), 20, 26), 8);
    }

    #[test]
    fn clicking_a_wide_character_lands_before_it() {
        let mut panel = TasksPanel::new("ph");
        let mut tasks = list(&["a", "", "日本語", "", ""]);
        render(&mut panel, &tasks);

        // Right half of 本
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 1 + GUTTER + 3, slot_y(2));
        panel.handle_mouse(click, &mut tasks);
        panel.handle_key(key(KeyCode::Char('X'), KeyModifiers::SHIFT), &mut tasks);
        assert_eq!(tasks.get(2), Some("日X本語"));
    }

    #[test]
    fn truncation_measures_display_width() {
        assert_eq!(truncate_with_ellipsis("ñññññ", 5), "ñññññ");
        assert_eq!(truncate_with_ellipsis("ñññññ", 3), "ññ…");
        assert_eq!(truncate_with_ellipsis("日本語", 6), "日本語");
        assert_eq!(truncate_with_ellipsis("日本語", 5), "日本…");
        assert_eq!(truncate_with_ellipsis("日本語", 4), "日…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        assert_eq!(scroll_offset("abc", 3, 10), 0);
        assert_eq!(scroll_offset("abcdefghijkl", 12, 10), 3);
        assert_eq!(scroll_offset("日日日日日日", 6, 5), 4);
        assert_eq!(scroll_offset("abc", 5, 0), 0);
    }
}
