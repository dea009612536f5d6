//! paraload: browse to a directory in the terminal and download a URL into it
//!
//! The navigation model (tree, file list, path field) lives in
//! [`view::file_tree`] and [`app::coordinator`] and builds without the
//! `runtime` feature. The terminal front end and the external services are
//! behind `runtime`.

pub mod app;
pub mod config;
pub mod model;
#[cfg(feature = "runtime")]
pub mod primitives;
#[cfg(feature = "runtime")]
pub mod services;
pub mod view;
