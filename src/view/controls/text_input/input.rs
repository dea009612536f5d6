//! Text input handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::{FocusState, TextInputLayout, TextInputState};
use crate::primitives::display_width::char_width;

/// Events that can be returned from text input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// Text was changed
    Changed(String),
    /// Input was submitted (Enter pressed)
    Submitted(String),
    /// Input gained focus
    Focused,
}

impl TextInputState {
    /// Handle a mouse event for this text input
    ///
    /// A left click anywhere on the control focuses it. A click inside the
    /// brackets also moves the cursor to the clicked column.
    ///
    /// # Returns
    /// * `Some(TextInputEvent::Focused)` if the click gave the field focus
    /// * `None` otherwise
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        layout: &TextInputLayout,
    ) -> Option<TextInputEvent> {
        let (x, y) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if layout.contains(x, y) => {
                if layout.is_input(x, y) {
                    // Column 0 of the input area is the opening bracket
                    let column = (x - layout.input_area.x).saturating_sub(1) as usize;
                    self.cursor = self.offset_at_column(layout.scroll + column);
                }
                if self.focus != FocusState::Focused {
                    self.focus = FocusState::Focused;
                    Some(TextInputEvent::Focused)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Byte offset of the character drawn at display column `column`, or
    /// the end of the value when the column is past it
    fn offset_at_column(&self, column: usize) -> usize {
        let mut width = 0;
        for (idx, ch) in self.value.char_indices() {
            let w = char_width(ch);
            if width + w > column {
                return idx;
            }
            width += w;
        }
        self.value.len()
    }

    /// Handle a keyboard event for this text input
    ///
    /// Keys the field does not use (Tab, Esc, function keys, Ctrl chords)
    /// return `None` so the caller can handle them.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TextInputEvent> {
        if self.focus != FocusState::Focused {
            return None;
        }

        match key.code {
            KeyCode::Enter => Some(TextInputEvent::Submitted(self.value.clone())),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.backspace();
                    Some(TextInputEvent::Changed(self.value.clone()))
                } else {
                    None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.delete();
                    Some(TextInputEvent::Changed(self.value.clone()))
                } else {
                    None
                }
            }
            KeyCode::Left => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.move_home();
                } else {
                    self.move_left();
                }
                None
            }
            KeyCode::Right => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.move_end();
                } else {
                    self.move_right();
                }
                None
            }
            KeyCode::Home => {
                self.move_home();
                None
            }
            KeyCode::End => {
                self.move_end();
                None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c);
                Some(TextInputEvent::Changed(self.value.clone()))
            }
            _ => None,
        }
    }
}
