//! Keeps the tree, the file list and the path field pointing at one path
//!
//! Each surface reports what the user did as a [`NavEvent`]. The coordinator
//! works out the new current path and pushes it into the other two surfaces.
//! Nothing is cached between events; every transition lists the filesystem
//! again through the tree's [`FileSystem`](crate::model::filesystem::FileSystem).

use crate::view::controls::TextInputState;
use crate::view::file_tree::{flat_list_of, DirectoryTreeView, FileListView};
use std::path::Path;

/// Which surface started the most recent change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    TreeDriven,
    ListDriven,
    TextDriven,
}

/// Something the user did on one of the three surfaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The tree selection moved to this directory
    TreeSelected(String),
    /// The list selection moved to this entry
    ListSelected(String),
    /// A list entry was double-clicked or activated with Enter
    ListActivated(String),
    /// Enter was pressed in the path field
    PathCommitted,
}

/// What an event led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// All surfaces agree on the current path
    Settled,
    /// A regular file was activated; navigation is finished with this path
    Chosen(String),
    /// The path could not be found in the tree; nothing changed
    Unresolved(String),
}

#[derive(Debug)]
pub struct SelectionCoordinator {
    tree: DirectoryTreeView,
    list: FileListView,
    path_field: TextInputState,
    state: SelectionState,
    current: Option<String>,
}

impl SelectionCoordinator {
    pub fn new(tree: DirectoryTreeView) -> Self {
        Self {
            tree,
            list: FileListView::new(),
            path_field: TextInputState::new("Path"),
            state: SelectionState::Idle,
            current: None,
        }
    }

    pub fn tree(&self) -> &DirectoryTreeView {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DirectoryTreeView {
        &mut self.tree
    }

    pub fn list(&self) -> &FileListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut FileListView {
        &mut self.list
    }

    pub fn path_field(&self) -> &TextInputState {
        &self.path_field
    }

    pub fn path_field_mut(&mut self) -> &mut TextInputState {
        &mut self.path_field
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The path all three surfaces last agreed on
    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Select `dir` in the tree as if its path had been committed, revealing
    /// it and populating the list and the path field
    pub fn start_at(&mut self, dir: &str) -> NavOutcome {
        self.reveal_in_tree(dir)
    }

    pub fn handle(&mut self, event: NavEvent) -> NavOutcome {
        match event {
            NavEvent::TreeSelected(dir) => {
                self.on_tree_selected(dir);
                NavOutcome::Settled
            }
            NavEvent::ListSelected(entry) => {
                self.state = SelectionState::ListDriven;
                self.path_field.set_value(entry.as_str());
                self.current = Some(entry);
                NavOutcome::Settled
            }
            NavEvent::ListActivated(entry) => self.on_list_activated(entry),
            NavEvent::PathCommitted => {
                let typed = self.path_field.value().to_string();
                let outcome = self.reveal_in_tree(&typed);
                if outcome == NavOutcome::Settled {
                    self.state = SelectionState::TextDriven;
                }
                outcome
            }
        }
    }

    /// Directory selected in the tree: list first, then the path field
    fn on_tree_selected(&mut self, dir: String) {
        self.state = SelectionState::TreeDriven;
        let entries = flat_list_of(self.tree.adapter().fs(), &dir);
        self.list.set_entries(entries);
        self.path_field.set_value(dir.as_str());
        self.current = Some(dir);
    }

    fn on_list_activated(&mut self, entry: String) -> NavOutcome {
        match self.tree.adapter().fs().is_dir(Path::new(&entry)) {
            Ok(true) => self.reveal_in_tree(&entry),
            Ok(false) => {
                tracing::info!("Chose {}", entry);
                NavOutcome::Chosen(entry)
            }
            Err(e) => {
                // Anything that is not a readable directory counts as a file
                tracing::debug!("Cannot stat {}: {}; choosing it as a file", entry, e);
                NavOutcome::Chosen(entry)
            }
        }
    }

    /// Select `path` in the tree and run the tree-selection transition.
    /// Leaves every surface untouched when the path cannot be reached.
    fn reveal_in_tree(&mut self, path: &str) -> NavOutcome {
        if !self.tree.select(path) {
            tracing::warn!("No directory in the tree matches {}", path);
            return NavOutcome::Unresolved(path.to_string());
        }

        let Some(selected) = self.tree.get_selected().map(str::to_string) else {
            return NavOutcome::Unresolved(path.to_string());
        };
        self.tree.show(&selected);
        tracing::info!("Selected {}", selected);
        self.on_tree_selected(selected);
        NavOutcome::Settled
    }
}
