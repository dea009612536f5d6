//! View and UI layer
//!
//! `file_tree` and `controls` hold plain state and build without a terminal.
//! The renderers and the theme need ratatui.

pub mod controls;
pub mod file_tree;
#[cfg(feature = "runtime")]
pub mod theme;
#[cfg(feature = "runtime")]
pub mod ui;
