//! Key and mouse dispatch

use super::coordinator::NavEvent;
use super::picker::{App, Focus, LastClick};
use crate::view::controls::text_input::TextInputEvent;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Instant;

/// Rows moved per wheel notch
const SCROLL_STEP: usize = 3;

impl App {
    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return self.quit(),
                KeyCode::Char('v') => return self.paste_url(),
                KeyCode::Char('d') => return self.start_download(),
                KeyCode::Char('o') => return self.open_folder(),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => return self.quit(),
            KeyCode::Tab => return self.set_focus(self.focus.next()),
            KeyCode::BackTab => return self.set_focus(self.focus.prev()),
            _ => {}
        }

        match self.focus {
            Focus::Tree => self.handle_tree_key(key),
            Focus::List => self.handle_list_key(key),
            Focus::Path => self.handle_path_key(key),
            Focus::Url => self.handle_url_key(key),
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) {
        let tree = self.nav.tree_mut();
        let changed = match key.code {
            KeyCode::Up => tree.select_prev(),
            KeyCode::Down => tree.select_next(),
            KeyCode::PageUp => tree.select_page_up(),
            KeyCode::PageDown => tree.select_page_down(),
            KeyCode::Home => tree.select_first(),
            KeyCode::End => tree.select_last(),
            KeyCode::Right => {
                if let Some(selected) = tree.get_selected().map(str::to_string) {
                    tree.expand(&selected);
                }
                None
            }
            KeyCode::Left => match tree.get_selected().map(str::to_string) {
                Some(selected) => tree.collapse(&selected),
                None => None,
            },
            KeyCode::Enter => match tree.get_selected().map(str::to_string) {
                Some(selected) => tree.toggle(&selected),
                None => None,
            },
            _ => None,
        };

        if let Some(dir) = changed {
            self.navigate(NavEvent::TreeSelected(dir));
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let list = self.nav.list_mut();
        let changed = match key.code {
            KeyCode::Up => list.select_prev(),
            KeyCode::Down => list.select_next(),
            KeyCode::PageUp => list.select_page_up(),
            KeyCode::PageDown => list.select_page_down(),
            KeyCode::Home => list.select_first(),
            KeyCode::End => list.select_last(),
            KeyCode::Enter => {
                if let Some(entry) = list.get_selected().map(str::to_string) {
                    self.navigate(NavEvent::ListActivated(entry));
                }
                return;
            }
            _ => None,
        };

        if let Some(entry) = changed {
            self.navigate(NavEvent::ListSelected(entry));
        }
    }

    fn handle_path_key(&mut self, key: KeyEvent) {
        if let Some(TextInputEvent::Submitted(_)) = self.nav.path_field_mut().handle_key(key) {
            self.navigate(NavEvent::PathCommitted);
        }
    }

    fn handle_url_key(&mut self, key: KeyEvent) {
        if let Some(TextInputEvent::Submitted(_)) = self.url_field.handle_key(key) {
            self.start_download();
        }
    }

    /// Handle one mouse event. Returns true when the screen should be redrawn.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        self.handle_mouse_at(event, Instant::now())
    }

    /// Mouse handling with an explicit clock, so double clicks can be tested
    pub fn handle_mouse_at(&mut self, event: MouseEvent, now: Instant) -> bool {
        let (col, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = row_in_panel(self.layout.tree, col, row) {
                    self.click_tree_row(self.nav.tree().get_scroll_offset() + index, now);
                    true
                } else if let Some(index) = row_in_panel(self.layout.list, col, row) {
                    self.click_list_row(self.nav.list().get_scroll_offset() + index, now);
                    true
                } else if self.layout.path.contains(col, row) {
                    self.nav.path_field_mut().handle_mouse(event, &self.layout.path);
                    self.set_focus(Focus::Path);
                    true
                } else if self.layout.url.contains(col, row) {
                    self.url_field.handle_mouse(event, &self.layout.url);
                    self.set_focus(Focus::Url);
                    true
                } else {
                    false
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let down = event.kind == MouseEventKind::ScrollDown;
                if contains(self.layout.tree, col, row) {
                    let tree = self.nav.tree_mut();
                    let max = tree.visible_count().saturating_sub(1);
                    let offset = scrolled(tree.get_scroll_offset(), down, max);
                    tree.set_scroll_offset(offset);
                    true
                } else if contains(self.layout.list, col, row) {
                    let list = self.nav.list_mut();
                    let max = list.adapter().count().saturating_sub(1);
                    let offset = scrolled(list.get_scroll_offset(), down, max);
                    list.set_scroll_offset(offset);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn is_double_click(&mut self, focus: Focus, row: usize, now: Instant) -> bool {
        let window = self.double_click_window();
        let double = self.last_click.is_some_and(|last| {
            last.focus == focus && last.row == row && now.duration_since(last.at) <= window
        });
        // A double click consumes the pair; a third click starts over
        self.last_click = if double {
            None
        } else {
            Some(LastClick { focus, row, at: now })
        };
        double
    }

    fn click_tree_row(&mut self, index: usize, now: Instant) {
        self.set_focus(Focus::Tree);
        if index >= self.nav.tree().visible_count() {
            return;
        }

        let double = self.is_double_click(Focus::Tree, index, now);
        if let Some(dir) = self.nav.tree_mut().select_index(index) {
            self.navigate(NavEvent::TreeSelected(dir));
        }
        if double {
            if let Some(selected) = self.nav.tree().get_selected().map(str::to_string) {
                if let Some(dir) = self.nav.tree_mut().toggle(&selected) {
                    self.navigate(NavEvent::TreeSelected(dir));
                }
            }
        }
    }

    fn click_list_row(&mut self, index: usize, now: Instant) {
        self.set_focus(Focus::List);
        if index >= self.nav.list().adapter().count() {
            return;
        }

        let double = self.is_double_click(Focus::List, index, now);
        if let Some(entry) = self.nav.list_mut().select_index(index) {
            self.navigate(NavEvent::ListSelected(entry));
        }
        if double {
            if let Some(entry) = self.nav.list().get_selected().map(str::to_string) {
                self.navigate(NavEvent::ListActivated(entry));
            }
        }
    }
}

fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

/// Row index inside a bordered panel, if the point is on a content row
fn row_in_panel(area: Rect, col: u16, row: u16) -> Option<usize> {
    let inner = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    contains(inner, col, row).then(|| (row - inner.y) as usize)
}

fn scrolled(offset: usize, down: bool, max: usize) -> usize {
    if down {
        (offset + SCROLL_STEP).min(max)
    } else {
        offset.saturating_sub(SCROLL_STEP)
    }
}
