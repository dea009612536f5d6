//! Single-line text input control
//!
//! Renders as a labelled field:
//! ```text
//! Path: [/home/user/downloads        ]
//! ```
//!
//! Used for the path field and the URL field. The state is plain data so the
//! navigation code can read and write it without a terminal; key handling and
//! rendering live in the runtime-only submodules.

#[cfg(feature = "runtime")]
mod input;
#[cfg(feature = "runtime")]
mod render;

#[cfg(feature = "runtime")]
pub use input::TextInputEvent;
#[cfg(feature = "runtime")]
pub use render::{render_text_input, TextInputColors, TextInputLayout};

use super::FocusState;

/// State for a text input control
#[derive(Debug, Clone)]
pub struct TextInputState {
    /// Current text value
    pub value: String,
    /// Cursor position as a byte offset into `value`
    pub cursor: usize,
    /// Label displayed before the field
    pub label: String,
    /// Text shown while the value is empty
    pub placeholder: String,
    /// Focus state
    pub focus: FocusState,
}

impl TextInputState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            label: label.into(),
            placeholder: String::new(),
            focus: FocusState::Normal,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the whole value and put the cursor at the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn is_focused(&self) -> bool {
        self.focus == FocusState::Focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focus = if focused {
            FocusState::Focused
        } else {
            FocusState::Normal
        };
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a pasted string at the cursor. Line breaks are dropped since
    /// the field is single-line.
    pub fn insert_str(&mut self, s: &str) {
        let cleaned: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.value.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut state = TextInputState::new("Path").with_value("/tmp");
        assert_eq!(state.cursor, 4);

        state.insert('x');
        assert_eq!(state.value(), "/tmpx");
        state.backspace();
        state.move_home();
        state.delete();
        assert_eq!(state.value(), "tmp");
        state.move_end();
        state.move_left();
        state.insert('-');
        assert_eq!(state.value(), "tm-p");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut state = TextInputState::new("Path").with_value("/é");
        state.backspace();
        assert_eq!(state.value(), "/");
        state.insert('文');
        state.move_left();
        state.move_left();
        assert_eq!(state.cursor, 0);
        state.move_right();
        state.move_right();
        assert_eq!(state.cursor, state.value.len());
    }

    #[test]
    fn test_insert_str_drops_newlines() {
        let mut state = TextInputState::new("URL");
        state.insert_str("https://example.com/file\r\n");
        assert_eq!(state.value(), "https://example.com/file");
        assert_eq!(state.cursor, state.value.len());
    }
}
