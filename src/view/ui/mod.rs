//! Panel renderers

pub mod directory_tree;
pub mod file_list;
pub mod status_bar;

pub use directory_tree::DirectoryTreeRenderer;
pub use file_list::FileListRenderer;
pub use status_bar::render_status_bar;
