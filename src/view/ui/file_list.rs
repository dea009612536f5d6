use super::directory_tree::panel_styles;
use crate::model::filesystem::FileSystem;
use crate::primitives::display_width::truncate_to_width;
use crate::view::file_tree::{EntryKind, FileListView};
use crate::view::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct FileListRenderer;

impl FileListRenderer {
    /// Render the entries of the selected directory.
    ///
    /// Each visible row is classified with a status call while drawing, so
    /// the colours follow the disk even between listings.
    pub fn render(
        view: &mut FileListView,
        fs: &dyn FileSystem,
        frame: &mut Frame,
        area: Rect,
        is_focused: bool,
        theme: &Theme,
    ) {
        let viewport_height = area.height.saturating_sub(2) as usize;
        view.set_viewport_height(viewport_height);

        let adapter = view.adapter();
        let count = adapter.count();
        let scroll_offset = view.get_scroll_offset().min(count);
        let visible_end = (scroll_offset + viewport_height).min(count);
        let content_width = area.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = (scroll_offset..visible_end)
            .map(|index| {
                let label = adapter.label_at(index).unwrap_or_default();
                let (marker, color) = match adapter.kind_at(fs, index) {
                    Some(EntryKind::Directory) => ("/", theme.directory_fg),
                    _ => ("", theme.file_fg),
                };
                let text = truncate_to_width(label, content_width.saturating_sub(marker.len()));
                ListItem::new(Line::from(vec![
                    Span::styled(text.to_string(), Style::default().fg(color)),
                    Span::styled(marker, Style::default().fg(theme.title_fg)),
                ]))
            })
            .collect();

        let title = format!(" Files ({}) ", count);
        let (title_style, border_style) = panel_styles(is_focused, theme);
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(title_style)
                    .border_style(border_style)
                    .style(Style::default().bg(theme.bg)),
            )
            .highlight_style(if is_focused {
                Style::default().bg(theme.selection_bg)
            } else {
                Style::default().bg(theme.inactive_selection_bg)
            });

        let mut list_state = ListState::default();
        if let Some(selected) = view.get_selected_index() {
            if selected >= scroll_offset && selected < scroll_offset + viewport_height {
                list_state.select(Some(selected - scroll_offset));
            }
        }

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
