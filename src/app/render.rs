use super::picker::{App, Focus};
use crate::view::controls::text_input::{render_text_input, TextInputColors};
use crate::view::ui::{render_status_bar, DirectoryTreeRenderer, FileListRenderer};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Width of the field labels ("Path", "URL")
const LABEL_WIDTH: u16 = 4;

impl App {
    /// Draw the whole picker and remember where everything went
    pub fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let tree_percent = self.config.explorer.tree_width_percent;
        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(tree_percent),
                Constraint::Percentage(100 - tree_percent),
            ])
            .split(rows[0]);

        DirectoryTreeRenderer::render(
            self.nav.tree_mut(),
            frame,
            panels[0],
            self.focus == Focus::Tree,
            &self.theme,
        );
        let fs = self.fs.clone();
        FileListRenderer::render(
            self.nav.list_mut(),
            fs.as_ref(),
            frame,
            panels[1],
            self.focus == Focus::List,
            &self.theme,
        );

        let colors = TextInputColors {
            text: self.theme.fg,
            border: self.theme.border_fg,
            label: self.theme.title_fg,
            placeholder: self.theme.input_placeholder_fg,
            focused: self.theme.cursor,
            ..TextInputColors::default()
        };
        let path_layout =
            render_text_input(frame, rows[1], self.nav.path_field(), &colors, Some(LABEL_WIDTH));
        let url_layout = render_text_input(frame, rows[2], &self.url_field, &colors, Some(LABEL_WIDTH));

        render_status_bar(
            frame,
            rows[3],
            self.status.as_ref(),
            self.pending_download.is_some(),
            &self.theme,
        );

        if let Some(pos) = path_layout.cursor_pos.or(url_layout.cursor_pos) {
            frame.set_cursor_position(pos);
        }

        self.layout.tree = panels[0];
        self.layout.list = panels[1];
        self.layout.path = path_layout;
        self.layout.url = url_layout;
    }
}
