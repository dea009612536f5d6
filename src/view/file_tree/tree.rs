use super::node::{self, DirectoryNode};
use crate::model::filesystem::FileSystem;
use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

/// Lazily expanded directory tree seeded with filesystem roots.
///
/// The adapter keeps only the root level. Every deeper level is produced by
/// listing the filesystem when it is asked for, so there is no node graph to
/// keep in sync and no cache to invalidate.
pub struct DirectoryTreeAdapter {
    fs: Arc<dyn FileSystem>,
    roots: DirectoryNode,
}

impl fmt::Debug for DirectoryTreeAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryTreeAdapter")
            .field("fs", &"<dyn FileSystem>")
            .field("roots", &self.roots.subdirs)
            .finish()
    }
}

impl DirectoryTreeAdapter {
    /// Create an adapter over the given roots. Hidden roots are dropped with
    /// the same rule as every other level.
    pub fn new(fs: Arc<dyn FileSystem>, roots: Vec<String>) -> Self {
        Self {
            fs,
            roots: DirectoryNode::with_subdirs(String::new(), roots),
        }
    }

    /// The filesystem the adapter lists through
    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Root paths shown at the top level
    pub fn roots(&self) -> &[String] {
        &self.roots.subdirs
    }

    /// Number of root-level entries
    pub fn count(&self) -> usize {
        self.roots.count()
    }

    /// A freshly listed node for the root at `index`
    pub fn node_at(&self, index: usize) -> Option<DirectoryNode> {
        self.roots.node_at(self.fs(), index)
    }

    /// Index of the root containing `path`. When roots nest, the deepest
    /// one wins.
    pub fn item_index_for(&self, path: &str) -> Option<usize> {
        self.root_candidates(path).into_iter().next()
    }

    /// Root rows are labelled with the full root path
    pub fn label_at(&self, index: usize) -> Option<String> {
        self.roots.subdirs.get(index).cloned()
    }

    /// Walk from the roots down to `path`, one level at a time.
    ///
    /// Returns the chain of directory paths from the root to the directory
    /// equal to `path`, or `None` when some level has no child containing it.
    /// Roots can overlap (`/` and a configured root below a hidden
    /// directory), so every root containing `path` is tried, deepest first.
    pub fn resolve(&self, path: &str) -> Option<Vec<String>> {
        let chain = self
            .root_candidates(path)
            .into_iter()
            .find_map(|index| self.descend(&self.roots.subdirs[index], path));
        if chain.is_none() {
            tracing::debug!("No root reaches {}", path);
        }
        chain
    }

    /// Indices of the roots containing `path`, longest root first
    fn root_candidates(&self, path: &str) -> Vec<usize> {
        let target = node::with_trailing_separator(path);
        let mut candidates: Vec<(usize, usize)> = self
            .roots
            .subdirs
            .iter()
            .enumerate()
            .filter_map(|(index, root)| {
                let root = node::with_trailing_separator(root);
                target.starts_with(&root).then_some((index, root.len()))
            })
            .collect();
        candidates.sort_by_key(|&(_, len)| Reverse(len));
        candidates.into_iter().map(|(index, _)| index).collect()
    }

    fn descend(&self, root: &str, path: &str) -> Option<Vec<String>> {
        let mut chain = vec![root.to_string()];
        let mut current = root.to_string();

        while !node::same_path(&current, path) {
            let level = DirectoryNode::at(self.fs(), &current);
            let Some(index) = level.item_index_for(path) else {
                tracing::debug!("No entry under {} contains {}", current, path);
                return None;
            };
            current = level.subdirs[index].clone();
            chain.push(current.clone());
        }
        Some(chain)
    }
}
