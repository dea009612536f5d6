use crate::primitives::display_width::{str_width, truncate_to_width};
use crate::view::file_tree::{node, DirectoryTreeView, TreeRow};
use crate::view::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct DirectoryTreeRenderer;

impl DirectoryTreeRenderer {
    /// Render the directory tree in the given frame area
    pub fn render(
        view: &mut DirectoryTreeView,
        frame: &mut Frame,
        area: Rect,
        is_focused: bool,
        theme: &Theme,
    ) {
        // Borders take one row at the top and one at the bottom
        let viewport_height = area.height.saturating_sub(2) as usize;
        view.set_viewport_height(viewport_height);

        let rows = view.visible_rows();
        let selected_index = view
            .get_selected()
            .and_then(|sel| rows.iter().position(|row| node::same_path(&row.path, sel)));

        // Rows can disappear between frames (a directory removed on disk)
        let scroll_offset = view.get_scroll_offset().min(rows.len());

        // Only the visible subset goes to the List, so ratatui never scrolls
        let visible_end = (scroll_offset + viewport_height).min(rows.len());
        let content_width = area.width.saturating_sub(3) as usize;

        let items: Vec<ListItem> = rows[scroll_offset..visible_end]
            .iter()
            .map(|row| Self::render_row(row, theme, content_width))
            .collect();

        let (title_style, border_style) = panel_styles(is_focused, theme);
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Folders ")
                    .title_style(title_style)
                    .border_style(border_style)
                    .style(Style::default().bg(theme.bg)),
            )
            .highlight_style(if is_focused {
                Style::default().bg(theme.selection_bg).fg(theme.fg)
            } else {
                Style::default().bg(theme.inactive_selection_bg)
            });

        let mut list_state = ListState::default();
        if let Some(selected) = selected_index {
            if selected >= scroll_offset && selected < scroll_offset + viewport_height {
                list_state.select(Some(selected - scroll_offset));
            }
        }

        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_row(row: &TreeRow, theme: &Theme, content_width: usize) -> ListItem<'static> {
        let indent = "  ".repeat(row.depth);
        let indicator = if row.expanded { "▼ " } else { "▶ " };
        let used = str_width(&indent) + str_width(indicator);
        let label = truncate_to_width(&row.label, content_width.saturating_sub(used));

        let name_style = if row.depth == 0 {
            Style::default()
                .fg(theme.directory_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.directory_fg)
        };

        ListItem::new(Line::from(vec![
            Span::raw(indent),
            Span::styled(indicator, Style::default().fg(theme.title_fg)),
            Span::styled(label.to_string(), name_style),
        ]))
    }
}

/// Title and border styles shared by the two panels
pub(crate) fn panel_styles(is_focused: bool, theme: &Theme) -> (Style, Style) {
    if is_focused {
        (
            Style::default()
                .fg(theme.bg)
                .bg(theme.fg)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme.cursor),
        )
    } else {
        (
            Style::default().fg(theme.title_fg),
            Style::default().fg(theme.border_fg),
        )
    }
}
