use super::filter;
use crate::model::filesystem::FileSystem;
use std::path::Path;

/// How a list row is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// Flat list of the entries of one directory.
///
/// Holds only what is on screen. Every `set_entries` replaces the whole list
/// and bumps `generation`, which is how the view learns its data changed.
#[derive(Debug, Clone, Default)]
pub struct FileListAdapter {
    entries: Vec<String>,
    generation: u64,
}

impl FileListAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed entries wholesale
    pub fn set_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn entry_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Position of the entry equal to `path`. Exact string match only.
    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry == path)
    }

    /// Incremented on every `set_entries`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.entry_at(index).map(filter::final_segment)
    }

    /// Classify the entry with a status call made now. Symlinks are followed;
    /// anything that cannot be stat'ed is drawn as a file.
    pub fn kind_at(&self, fs: &dyn FileSystem, index: usize) -> Option<EntryKind> {
        let entry = self.entry_at(index)?;
        Some(match fs.is_dir(Path::new(entry)) {
            Ok(true) => EntryKind::Directory,
            Ok(false) => EntryKind::File,
            Err(e) => {
                tracing::debug!("Cannot stat {}: {}", entry, e);
                EntryKind::File
            }
        })
    }
}

/// Selection and scroll state over a [`FileListAdapter`]
#[derive(Debug, Default)]
pub struct FileListView {
    adapter: FileListAdapter,
    selected: Option<usize>,
    scroll_offset: usize,
    pub(crate) viewport_height: usize,
}

impl FileListView {
    pub fn new() -> Self {
        Self {
            viewport_height: 10,
            ..Self::default()
        }
    }

    pub fn adapter(&self) -> &FileListAdapter {
        &self.adapter
    }

    /// Replace the entries. Selection and scroll start over.
    pub fn set_entries(&mut self, entries: Vec<String>) {
        self.adapter.set_entries(entries);
        self.selected = None;
        self.scroll_offset = 0;
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
    }

    pub fn get_selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn get_selected(&self) -> Option<&str> {
        self.adapter.entry_at(self.selected?)
    }

    pub fn get_scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    /// Select the row at `index`; returns the entry if the selection changed
    pub fn select_index(&mut self, index: usize) -> Option<String> {
        let entry = self.adapter.entry_at(index)?.to_string();
        self.ensure_visible(index);
        if self.selected == Some(index) {
            return None;
        }
        self.selected = Some(index);
        Some(entry)
    }

    /// Select the entry equal to `path`
    pub fn select_path(&mut self, path: &str) -> Option<String> {
        let index = self.adapter.index_of(path)?;
        self.select_index(index)
    }

    fn select_relative(&mut self, delta: isize) -> Option<String> {
        let count = self.adapter.count();
        if count == 0 {
            return None;
        }
        let target = match self.selected {
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
        let count = self.adapter.count();
        if count == 0 {
            return None;
        }
        self.select_index(count - 1)
    }

    fn ensure_visible(&mut self, index: usize) {
        if self.viewport_height == 0 {
            return;
        }
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = index - self.viewport_height + 1;
        }
    }
}
