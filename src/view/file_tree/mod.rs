//! Lazy directory navigation
//!
//! Nothing in this module keeps a tree of nodes in memory. Every level is
//! listed from the filesystem when it is asked for and addressed by its path
//! string, so the views only remember which paths are expanded or selected.
//!
//! - `filter`: which entries are hidden
//! - `node`: one directory and its visible subdirectories
//! - `tree`: the root-seeded tree adapter
//! - `view`: selection, expansion and scroll state for the tree panel
//! - `list`: the flat list of one directory's entries

pub mod filter;
pub mod list;
pub mod node;
pub mod tree;
pub mod view;

pub use list::{EntryKind, FileListAdapter, FileListView};
pub use node::{children_of, flat_list_of, DirectoryNode};
pub use tree::DirectoryTreeAdapter;
pub use view::{DirectoryTreeView, TreeRow};
