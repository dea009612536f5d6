//! Filesystem access and directory sizes

pub mod dir_size;
pub mod filesystem;
