//! Status bar rendering

use crate::app::StatusMessage;
use crate::primitives::display_width::{str_width, truncate_start};
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Key hints shown on the right when there is room
const HINTS: &str = "Tab focus  ^V paste  ^D download  ^O open  Esc quit";

/// Render the status line: the latest message on the left, key hints on
/// the right when they fit.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status: Option<&StatusMessage>,
    downloading: bool,
    theme: &Theme,
) {
    if area.height == 0 {
        return;
    }

    let base = Style::default().fg(theme.status_bar_fg).bg(theme.status_bar_bg);
    let width = area.width as usize;

    let prefix = if downloading { "[downloading] " } else { "" };
    let message = status.map(|s| s.text.as_str()).unwrap_or("");
    let message_style = match status {
        Some(s) if s.is_error => base.fg(theme.status_error_fg).add_modifier(Modifier::BOLD),
        _ => base,
    };

    let hints_width = str_width(HINTS);
    let left_budget = if width > hints_width + 20 {
        width - hints_width - 2
    } else {
        width
    };
    let left = truncate_start(&format!(" {}{}", prefix, message), left_budget);
    let left_width = str_width(&left);

    let mut spans = vec![Span::styled(left, message_style)];
    if left_budget < width {
        let gap = width.saturating_sub(left_width + hints_width + 1);
        spans.push(Span::styled(" ".repeat(gap), base));
        spans.push(Span::styled(HINTS, base.add_modifier(Modifier::DIM)));
        spans.push(Span::styled(" ", base));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}
