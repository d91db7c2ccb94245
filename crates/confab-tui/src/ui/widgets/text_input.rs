//! Text input state for the message box.
//!
//! Tracks content, a cursor kept on char boundaries, and a submit history
//! navigable with Up/Down when the input is empty.

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Byte offset of the cursor, always on a char boundary.
    cursor: usize,
    /// Previously submitted inputs, oldest first.
    history: Vec<String>,
    /// Position while browsing history: 0 is the most recent entry.
    history_index: Option<usize>,
    /// Live input saved while browsing history.
    saved_input: String,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Byte offset of the cursor into the content.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        self.content.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if let Some(ch) = self.content[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
            self.content.remove(self.cursor);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    /// Move cursor one character left.
    pub fn move_left(&mut self) {
        if let Some(ch) = self.content[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    /// Move cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.content[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Move cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Take the content, record it in history, and clear the state.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Navigate to the previous (older) history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let next = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };

        self.history_index = Some(next);
        self.content = self.history[self.history.len() - 1 - next].clone();
        self.cursor = self.content.len();
    }

    /// Navigate to the next (newer) history entry, back to the live input.
    pub fn history_next(&mut self) {
        match self.history_index {
            Some(0) => {
                self.content = std::mem::take(&mut self.saved_input);
                self.history_index = None;
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                self.content = self.history[self.history.len() - i].clone();
            }
            None => return,
        }
        self.cursor = self.content.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_editing() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor(), 0);
        state.delete();
        assert_eq!(state.content(), "elXlo");

        state.move_end();
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::new();
        state.insert('é');
        state.insert('→');
        assert_eq!(state.content(), "é→");

        state.move_left();
        assert_eq!(state.cursor(), 'é'.len_utf8());
        state.backspace();
        assert_eq!(state.content(), "→");
    }

    #[test]
    fn test_submit_records_history() {
        let mut state = TextInputState::new();

        state.insert_str("first");
        assert_eq!(state.submit(), "first");
        assert!(state.is_empty());

        state.insert_str("second");
        state.submit();

        state.history_prev();
        assert_eq!(state.content(), "second");

        state.history_prev();
        assert_eq!(state.content(), "first");

        // Past the oldest entry is a no-op
        state.history_prev();
        assert_eq!(state.content(), "first");

        state.history_next();
        assert_eq!(state.content(), "second");
    }

    #[test]
    fn test_history_restores_live_input() {
        let mut state = TextInputState::new();
        state.insert_str("sent");
        state.submit();

        state.insert_str("draft");
        state.history_prev();
        assert_eq!(state.content(), "sent");

        state.history_next();
        assert_eq!(state.content(), "draft");
    }

    #[test]
    fn test_blank_submit_not_recorded() {
        let mut state = TextInputState::new();
        state.insert_str("   ");
        state.submit();

        state.history_prev();
        assert!(state.is_empty());
    }
}
