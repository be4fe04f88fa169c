use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Outcome of feeding a key to a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// The text changed; carries the full new value.
    Changed(String),
    /// Only the cursor moved.
    Moved,
    Unhandled,
}

/// Character-indexed cursor into a single-line text field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCursor {
    pos: usize,
}

impl FieldCursor {
    pub const fn position(self) -> usize {
        self.pos
    }

    /// Place the cursor, clamped to the end of `text`.
    pub fn set(&mut self, text: &str, pos: usize) {
        self.pos = pos.min(text.chars().count());
    }

    pub fn move_to_end(&mut self, text: &str) {
        self.pos = text.chars().count();
    }

    pub fn apply(&mut self, text: &str, key: KeyEvent) -> FieldEdit {
        let len = text.chars().count();
        self.pos = self.pos.min(len);

        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut new_text = text.to_string();
                new_text.insert(byte_offset(text, self.pos), c);
                self.pos += 1;
                FieldEdit::Changed(new_text)
            }
            KeyCode::Backspace if self.pos > 0 => {
                let mut new_text = text.to_string();
                new_text.remove(byte_offset(text, self.pos - 1));
                self.pos -= 1;
                FieldEdit::Changed(new_text)
            }
            KeyCode::Delete if self.pos < len => {
                let mut new_text = text.to_string();
                new_text.remove(byte_offset(text, self.pos));
                FieldEdit::Changed(new_text)
            }
            KeyCode::Backspace | KeyCode::Delete => FieldEdit::Moved,
            KeyCode::Left => {
                self.pos = self.pos.saturating_sub(1);
                FieldEdit::Moved
            }
            KeyCode::Right => {
                self.pos = (self.pos + 1).min(len);
                FieldEdit::Moved
            }
            KeyCode::Home => {
                self.pos = 0;
                FieldEdit::Moved
            }
            KeyCode::End => {
                self.pos = len;
                FieldEdit::Moved
            }
            _ => FieldEdit::Unhandled,
        }
    }
}

fn byte_offset(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map_or(text.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut cursor = FieldCursor::default();
        cursor.set("ac", 1);
        assert_eq!(
            cursor.apply("ac", key(KeyCode::Char('b'))),
            FieldEdit::Changed("abc".to_string())
        );
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn shifted_characters_are_typed() {
        let mut cursor = FieldCursor::default();
        let edit = cursor.apply("", KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(edit, FieldEdit::Changed("A".to_string()));
    }

    #[test]
    fn control_characters_are_not_typed() {
        let mut cursor = FieldCursor::default();
        let edit = cursor.apply("", KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(edit, FieldEdit::Unhandled);
    }

    #[test]
    fn backspace_and_delete_handle_multibyte_text() {
        let text = "añb";
        let mut cursor = FieldCursor::default();
        cursor.set(text, 2);

        assert_eq!(
            cursor.apply(text, key(KeyCode::Backspace)),
            FieldEdit::Changed("ab".to_string())
        );
        assert_eq!(cursor.position(), 1);

        cursor.set(text, 1);
        assert_eq!(
            cursor.apply(text, key(KeyCode::Delete)),
            FieldEdit::Changed("ab".to_string())
        );
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn backspace_at_start_does_nothing() {
        let mut cursor = FieldCursor::default();
        assert_eq!(cursor.apply("abc", key(KeyCode::Backspace)), FieldEdit::Moved);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let mut cursor = FieldCursor::default();
        cursor.apply("ab", key(KeyCode::Left));
        assert_eq!(cursor.position(), 0);

        cursor.apply("ab", key(KeyCode::End));
        cursor.apply("ab", key(KeyCode::Right));
        assert_eq!(cursor.position(), 2);

        cursor.apply("ab", key(KeyCode::Home));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn stale_cursor_is_clamped_to_shorter_text() {
        let mut cursor = FieldCursor::default();
        cursor.set("abcdef", 6);
        assert_eq!(
            cursor.apply("ab", key(KeyCode::Char('c'))),
            FieldEdit::Changed("abc".to_string())
        );
        assert_eq!(cursor.position(), 3);
    }
}
