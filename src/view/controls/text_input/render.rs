//! Text input rendering functions

use crate::primitives::display_width::{char_width, str_width};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, TextInputState};

/// Colors for the text input control
#[derive(Debug, Clone, Copy)]
pub struct TextInputColors {
    pub label: Color,
    pub text: Color,
    pub border: Color,
    pub placeholder: Color,
    pub focused: Color,
    pub cursor: Color,
}

impl Default for TextInputColors {
    fn default() -> Self {
        Self {
            label: Color::White,
            text: Color::White,
            border: Color::Gray,
            placeholder: Color::DarkGray,
            focused: Color::Cyan,
            cursor: Color::Yellow,
        }
    }
}

/// Layout information returned after rendering, for hit testing
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputLayout {
    /// The bracketed field itself
    pub input_area: Rect,
    /// Label plus field
    pub full_area: Rect,
    /// Screen position of the cursor when focused
    pub cursor_pos: Option<(u16, u16)>,
    /// Columns of the value scrolled out on the left
    pub scroll: usize,
}

impl TextInputLayout {
    pub fn is_input(&self, x: u16, y: u16) -> bool {
        rect_contains(self.input_area, x, y)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        rect_contains(self.full_area, x, y)
    }
}

fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Render a text input control across the full width of `area`
///
/// # Returns
/// Layout information for hit testing
pub fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    state: &TextInputState,
    colors: &TextInputColors,
    label_width: Option<u16>,
) -> TextInputLayout {
    if area.height == 0 || area.width < 5 {
        return TextInputLayout::default();
    }

    let (label_color, border_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.border),
        FocusState::Focused => (colors.focused, colors.focused),
    };

    let actual_label_width = label_width.unwrap_or(str_width(&state.label) as u16);
    let final_label_width = actual_label_width + 2;
    // Brackets take two columns
    let field_width = area.width.saturating_sub(final_label_width + 2);

    let (display_text, is_placeholder) = if state.value.is_empty() && !state.placeholder.is_empty()
    {
        (&state.placeholder, true)
    } else {
        (&state.value, false)
    };

    let inner_width = field_width as usize;

    // The cursor is a byte offset; scrolling works in columns
    let text_before_cursor = &state.value[..state.cursor.min(state.value.len())];
    let cursor_visual_pos = if is_placeholder {
        0
    } else {
        str_width(text_before_cursor)
    };
    let scroll_visual_offset = cursor_visual_pos.saturating_sub(inner_width.saturating_sub(1));

    let mut visible_text = String::new();
    let mut current_visual_pos = 0;
    for ch in display_text.chars() {
        let ch_width = char_width(ch);
        if current_visual_pos + ch_width <= scroll_visual_offset {
            current_visual_pos += ch_width;
            continue;
        }
        if current_visual_pos + ch_width - scroll_visual_offset > inner_width {
            break;
        }
        visible_text.push(ch);
        current_visual_pos += ch_width;
    }

    let visible_width = str_width(&visible_text);
    let padding = " ".repeat(inner_width.saturating_sub(visible_width));
    let padded = format!("{}{}", visible_text, padding);

    let text_style = if is_placeholder {
        Style::default().fg(colors.placeholder)
    } else {
        Style::default().fg(colors.text)
    };

    let padded_label = format!(
        "{:width$}",
        state.label,
        width = actual_label_width as usize
    );

    let line = Line::from(vec![
        Span::styled(padded_label, Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(padded, text_style),
        Span::styled("]", Style::default().fg(border_color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let input_start = area.x + final_label_width;
    let input_area = Rect::new(input_start, area.y, field_width + 2, 1);

    let cursor_pos = if state.focus == FocusState::Focused {
        let cursor_in_field = cursor_visual_pos.saturating_sub(scroll_visual_offset) as u16;
        let cursor_x = input_start + 1 + cursor_in_field;
        if cursor_x < input_start + field_width + 1 {
            let cursor_char = if is_placeholder {
                ' '
            } else {
                state.value[state.cursor.min(state.value.len())..]
                    .chars()
                    .next()
                    .unwrap_or(' ')
            };
            let cursor_span = Span::styled(
                cursor_char.to_string(),
                Style::default()
                    .fg(colors.cursor)
                    .add_modifier(Modifier::REVERSED),
            );
            frame.render_widget(
                Paragraph::new(Line::from(vec![cursor_span])),
                Rect::new(cursor_x, area.y, 1, 1),
            );
            Some((cursor_x, area.y))
        } else {
            None
        }
    } else {
        None
    };

    TextInputLayout {
        input_area,
        full_area: Rect::new(area.x, area.y, final_label_width + field_width + 2, 1),
        cursor_pos,
        scroll: scroll_visual_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_line(state: &TextInputState, width: u16) -> (String, TextInputLayout) {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut layout = TextInputLayout::default();
        terminal
            .draw(|frame| {
                let area = Rect::new(0, 0, width, 1);
                layout = render_text_input(frame, area, state, &TextInputColors::default(), None);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let line: String = (0..width).map(|x| buffer[(x, 0)].symbol()).collect();
        (line, layout)
    }

    #[test]
    fn test_renders_label_and_value() {
        let state = TextInputState::new("Path").with_value("/tmp");
        let (line, layout) = render_line(&state, 20);
        assert!(line.starts_with("Path: [/tmp"));
        assert!(line.trim_end().ends_with(']'));
        assert_eq!(layout.input_area.x, 6);
        assert!(layout.contains(0, 0));
        assert!(layout.cursor_pos.is_none());
    }

    #[test]
    fn test_placeholder_when_empty() {
        let state = TextInputState::new("URL").with_placeholder("paste here");
        let (line, _) = render_line(&state, 30);
        assert!(line.contains("paste here"));
    }

    #[test]
    fn test_long_value_scrolls_to_cursor() {
        let mut state = TextInputState::new("P").with_value("/a/very/long/path/name");
        state.set_focused(true);
        let (line, layout) = render_line(&state, 15);
        assert!(line.contains("name"));
        assert!(layout.cursor_pos.is_some());
        // 22 columns of text in a 10 column field, cursor after the end
        assert_eq!(layout.scroll, 13);
    }
}
