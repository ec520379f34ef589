//! Input text editing.
//!
//! Character insertion, deletion and cursor movement for single-line text
//! inputs. Cursor positions count characters, not bytes, so multi-byte text
//! edits correctly.

use crate::layout::char_width;

use super::keyboard::Key;

// =============================================================================
// TEXT EDITOR
// =============================================================================

/// Text and cursor of one input, edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditor {
    text: String,
    cursor: usize,
}

impl TextEditor {
    /// Editor over `text` with the cursor clamped to its length.
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        let text = text.into();
        let cursor = cursor.min(text.chars().count());
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Split into text and cursor.
    pub fn into_parts(self) -> (String, usize) {
        (self.text, self.cursor)
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the character at `index`.
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Insert a character at the cursor and advance it.
    pub fn insert_char(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    ///
    /// Returns `true` if the text changed.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.text.remove(offset);
        true
    }

    /// Delete the character at the cursor.
    ///
    /// Returns `true` if the text changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let offset = self.byte_offset(self.cursor);
        self.text.remove(offset);
        true
    }

    /// Move the cursor by `delta` characters, clamped to the text.
    pub fn move_cursor(&mut self, delta: i32) {
        let target = self.cursor as i64 + i64::from(delta);
        self.cursor = target.clamp(0, self.len() as i64) as usize;
    }

    /// Apply an editing key.
    ///
    /// Returns `Some(true)` if the text changed, `Some(false)` if only the
    /// cursor moved, and `None` if the key is not an editing key.
    pub fn handle_key(&mut self, key: Key) -> Option<bool> {
        match key {
            Key::Left => self.move_cursor(-1),
            Key::Right => self.move_cursor(1),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.len(),
            Key::Backspace => return Some(self.delete_backward()),
            Key::Delete => return Some(self.delete_forward()),
            _ => return None,
        }
        Some(false)
    }
}

// =============================================================================
// VISIBLE WINDOW
// =============================================================================

/// Index of the first character shown in a field `width` columns wide.
///
/// The window ends at the cursor cell (the character under the cursor, or
/// one blank column past the end) and reaches as far left as fits.
/// Widths are display columns.
pub fn window_start(text: &str, cursor: usize, width: u16) -> usize {
    let widths: Vec<u16> = text.chars().map(char_width).collect();
    let cursor = cursor.min(widths.len());
    let mut used = widths.get(cursor).copied().unwrap_or(1);
    let mut start = cursor;
    while start > 0 && used.saturating_add(widths[start - 1]) <= width {
        start -= 1;
        used += widths[start];
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_start() {
        assert_eq!(window_start("hello", 5, 16), 0);
        assert_eq!(window_start("abcdefgh", 8, 4), 5);
        assert_eq!(window_start("abcdefgh", 2, 4), 0);
        // Wide characters take two columns each
        assert_eq!(window_start("日本", 2, 6), 0);
        assert_eq!(window_start("日本語ab", 5, 6), 2);
        assert_eq!(window_start("日本語", 1, 3), 1);
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut editor = TextEditor::new("hllo", 1);
        editor.insert_char('e');
        assert_eq!(editor.text(), "hello");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_cursor_clamped_on_new() {
        let editor = TextEditor::new("abc", 99);
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_backspace() {
        let mut editor = TextEditor::new("abc", 3);
        assert!(editor.delete_backward());
        assert_eq!(editor.text(), "ab");
        assert_eq!(editor.cursor(), 2);

        let mut editor = TextEditor::new("abc", 0);
        assert!(!editor.delete_backward());
        assert_eq!(editor.text(), "abc");
    }

    #[test]
    fn test_delete_forward() {
        let mut editor = TextEditor::new("abc", 1);
        assert!(editor.delete_forward());
        assert_eq!(editor.text(), "ac");
        assert_eq!(editor.cursor(), 1);

        let mut editor = TextEditor::new("abc", 3);
        assert!(!editor.delete_forward());
    }

    #[test]
    fn test_multibyte() {
        let mut editor = TextEditor::new("héllo", 2);
        editor.insert_char('ü');
        assert_eq!(editor.text(), "héüllo");
        assert!(editor.delete_backward());
        assert!(editor.delete_backward());
        assert_eq!(editor.text(), "hllo");
    }

    #[test]
    fn test_handle_key() {
        let mut editor = TextEditor::new("abc", 1);
        assert_eq!(editor.handle_key(Key::End), Some(false));
        assert_eq!(editor.cursor(), 3);
        assert_eq!(editor.handle_key(Key::Home), Some(false));
        assert_eq!(editor.cursor(), 0);
        assert_eq!(editor.handle_key(Key::Left), Some(false));
        assert_eq!(editor.cursor(), 0);
        assert_eq!(editor.handle_key(Key::Delete), Some(true));
        assert_eq!(editor.text(), "bc");
        assert_eq!(editor.handle_key(Key::Tab), None);
    }
}
