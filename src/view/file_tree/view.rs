use super::node::{self, DirectoryNode};
use super::tree::DirectoryTreeAdapter;
use std::collections::HashSet;

/// One rendered line of the directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Absolute path of the directory on this row
    pub path: String,
    /// Text to display
    pub label: String,
    /// Nesting level (roots are 0)
    pub depth: usize,
    /// Whether the row's children are currently shown
    pub expanded: bool,
}

/// View state for tree navigation
///
/// Holds what the tree widget needs between events: which directories are
/// open, which one is selected and how far the panel is scrolled. Rows are
/// re-derived from the filesystem each time they are requested.
#[derive(Debug)]
pub struct DirectoryTreeView {
    /// The underlying lazy adapter
    adapter: DirectoryTreeAdapter,
    /// Expanded directories, keyed with a trailing separator
    expanded: HashSet<String>,
    /// Currently selected directory
    selected: Option<String>,
    /// Scroll offset (index into visible rows)
    scroll_offset: usize,
    /// Last known viewport height (for scrolling calculations)
    pub(crate) viewport_height: usize,
}

impl DirectoryTreeView {
    pub fn new(adapter: DirectoryTreeAdapter) -> Self {
        Self {
            adapter,
            expanded: HashSet::new(),
            selected: None,
            scroll_offset: 0,
            viewport_height: 10,
        }
    }

    /// Set the viewport height (should be called during rendering)
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
    }

    pub fn adapter(&self) -> &DirectoryTreeAdapter {
        &self.adapter
    }

    /// Rows in display order, listing every expanded directory afresh
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for (index, root) in self.adapter.roots().iter().enumerate() {
            let expanded = self.is_expanded(root);
            rows.push(TreeRow {
                path: root.clone(),
                label: self.adapter.label_at(index).unwrap_or_default(),
                depth: 0,
                expanded,
            });
            if expanded {
                if let Some(node) = self.adapter.node_at(index) {
                    self.collect_rows(&node, 1, &mut rows);
                }
            }
        }
        rows
    }

    fn collect_rows(&self, node: &DirectoryNode, depth: usize, rows: &mut Vec<TreeRow>) {
        for (index, subdir) in node.subdirs.iter().enumerate() {
            let expanded = self.is_expanded(subdir);
            rows.push(TreeRow {
                path: subdir.clone(),
                label: node::label_for(subdir),
                depth,
                expanded,
            });
            if expanded {
                if let Some(child) = node.node_at(self.adapter.fs(), index) {
                    self.collect_rows(&child, depth + 1, rows);
                }
            }
        }
    }

    /// Number of visible rows
    pub fn visible_count(&self) -> usize {
        self.visible_rows().len()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(&node::with_trailing_separator(path))
    }

    pub fn expand(&mut self, path: &str) {
        self.expanded.insert(node::with_trailing_separator(path));
    }

    /// Collapse `path`. If the selection was inside it, the selection moves
    /// to `path` and the new selection is returned.
    pub fn collapse(&mut self, path: &str) -> Option<String> {
        let key = node::with_trailing_separator(path);
        self.expanded.remove(&key);

        let inside = self
            .selected
            .as_deref()
            .is_some_and(|sel| !node::same_path(sel, path) && sel.starts_with(&key));
        if inside {
            self.selected = Some(path.to_string());
            self.selected.clone()
        } else {
            None
        }
    }

    /// Toggle expansion; returns a changed selection like `collapse`
    pub fn toggle(&mut self, path: &str) -> Option<String> {
        if self.is_expanded(path) {
            self.collapse(path)
        } else {
            self.expand(path);
            None
        }
    }

    /// Currently selected directory
    pub fn get_selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Row index of the selection, if it is visible
    pub fn get_selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        self.index_of(selected)
    }

    fn index_of(&self, path: &str) -> Option<usize> {
        self.visible_rows()
            .iter()
            .position(|row| node::same_path(&row.path, path))
    }

    /// Select the directory `path`, opening every ancestor on the way.
    ///
    /// Descends one level at a time using prefix lookup. Returns false and
    /// leaves the view untouched when the path cannot be reached.
    pub fn select(&mut self, path: &str) -> bool {
        let Some(chain) = self.adapter.resolve(path) else {
            return false;
        };
        let Some((target, ancestors)) = chain.split_last() else {
            return false;
        };
        for ancestor in ancestors {
            self.expand(ancestor);
        }
        self.selected = Some(target.clone());
        true
    }

    /// Scroll so that `path` is on screen
    pub fn show(&mut self, path: &str) {
        if let Some(pos) = self.index_of(path) {
            self.scroll_to(pos);
        }
    }

    fn scroll_to(&mut self, pos: usize) {
        if self.viewport_height == 0 {
            return;
        }
        if pos < self.scroll_offset {
            self.scroll_offset = pos;
        } else if pos >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = pos - self.viewport_height + 1;
        }
    }

    /// Select the row at `index`; returns the path if the selection changed
    pub fn select_index(&mut self, index: usize) -> Option<String> {
        let row = self.visible_rows().into_iter().nth(index)?;
        self.scroll_to(index);
        if self
            .selected
            .as_deref()
            .is_some_and(|sel| node::same_path(sel, &row.path))
        {
            return None;
        }
        self.selected = Some(row.path.clone());
        Some(row.path)
    }

    fn select_relative(&mut self, delta: isize) -> Option<String> {
        let count = self.visible_count();
        if count == 0 {
            return None;
        }
        let target = match self.get_selected_index() {
            Some(pos) => (pos as isize + delta).clamp(0, count as isize - 1) as usize,
            None => 0,
        };
        self.select_index(target)
    }

    pub fn select_next(&mut self) -> Option<String> {
        self.select_relative(1)
    }

    pub fn select_prev(&mut self) -> Option<String> {
        self.select_relative(-1)
    }

    pub fn select_page_down(&mut self) -> Option<String> {
        self.select_relative(self.viewport_height.max(1) as isize)
    }

    pub fn select_page_up(&mut self) -> Option<String> {
        self.select_relative(-(self.viewport_height.max(1) as isize))
    }

    pub fn select_first(&mut self) -> Option<String> {
        self.select_index(0)
    }

    pub fn select_last(&mut self) -> Option<String> {
        let count = self.visible_count();
        if count == 0 {
            return None;
        }
        self.select_index(count - 1)
    }

    pub fn get_scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }
}
