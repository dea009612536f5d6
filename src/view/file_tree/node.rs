use super::filter;
use crate::model::filesystem::FileSystem;
use std::path::{Path, MAIN_SEPARATOR};

/// One directory and its immediate, visible child directories.
///
/// Built fresh from a single-level listing every time it is needed and
/// dropped after use. Nothing here is cached, so a node reflects the
/// filesystem at the moment it was built and nothing later.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryNode {
    /// Absolute path of this directory
    pub path: String,
    /// Absolute paths of the immediate, visible subdirectories
    pub subdirs: Vec<String>,
}

impl DirectoryNode {
    /// List `path` and keep its visible child directories
    pub fn at(fs: &dyn FileSystem, path: &str) -> Self {
        Self {
            path: path.to_string(),
            subdirs: children_of(fs, path),
        }
    }

    /// A node whose children are given rather than listed (the root level)
    pub fn with_subdirs(path: impl Into<String>, subdirs: Vec<String>) -> Self {
        Self {
            path: path.into(),
            subdirs: filter::retain_visible(subdirs),
        }
    }

    /// Number of immediate subdirectories
    pub fn count(&self) -> usize {
        self.subdirs.len()
    }

    /// A freshly listed node for the subdirectory at `index`
    pub fn node_at(&self, fs: &dyn FileSystem, index: usize) -> Option<DirectoryNode> {
        self.subdirs
            .get(index)
            .map(|subdir| DirectoryNode::at(fs, subdir))
    }

    /// Index of the subdirectory that is `path` or one of its ancestors
    pub fn item_index_for(&self, path: &str) -> Option<usize> {
        item_index_for(&self.subdirs, path)
    }

    /// The path this node stands for
    pub fn item(&self) -> &str {
        &self.path
    }

    /// Final path segment, or the whole path when that segment is empty
    pub fn label(&self) -> String {
        label_for(&self.path)
    }
}

/// Immediate, visible subdirectories of `path`.
///
/// Single level only; files and hidden entries are dropped, and any listing
/// failure leaves the result empty.
pub fn children_of(fs: &dyn FileSystem, path: &str) -> Vec<String> {
    let entries = match fs.read_dir(Path::new(path)) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", path, e);
            return Vec::new();
        }
    };

    let mut subdirs: Vec<String> = entries
        .into_iter()
        .filter(|entry| entry.is_dir())
        .map(|entry| entry.path_string())
        .collect();
    subdirs.sort();
    filter::retain_visible(subdirs)
}

/// Immediate, visible children of `path`, files and directories alike.
pub fn flat_list_of(fs: &dyn FileSystem, path: &str) -> Vec<String> {
    let entries = match fs.read_dir(Path::new(path)) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", path, e);
            return Vec::new();
        }
    };

    let mut children: Vec<String> = entries.iter().map(|entry| entry.path_string()).collect();
    children.sort();
    filter::retain_visible(children)
}

/// `path` with exactly one trailing separator appended if it has none
pub fn with_trailing_separator(path: &str) -> String {
    if path.ends_with('/') || path.ends_with(MAIN_SEPARATOR) {
        path.to_string()
    } else {
        format!("{}{}", path, MAIN_SEPARATOR)
    }
}

/// Whether two path strings name the same directory, ignoring a trailing
/// separator on either side
pub fn same_path(a: &str, b: &str) -> bool {
    with_trailing_separator(a) == with_trailing_separator(b)
}

/// Index of the first candidate that contains `path` or equals it.
///
/// Both sides are compared with a trailing separator, so `/home/al` does
/// not claim `/home/alice`.
pub fn item_index_for(candidates: &[String], path: &str) -> Option<usize> {
    let target = with_trailing_separator(path);
    candidates
        .iter()
        .position(|candidate| target.starts_with(&with_trailing_separator(candidate)))
}

/// Display label for a tree row
pub fn label_for(path: &str) -> String {
    match filter::final_segment(path) {
        "" => path.to_string(),
        name => name.to_string(),
    }
}
