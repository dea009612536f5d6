//! External collaborators of the picker
//!
//! Everything here talks to something outside the process: the terminal,
//! the clipboard, the network, the desktop and the log directory.

pub mod clipboard;
pub mod download;
pub mod log_dirs;
pub mod opener;
pub mod roots;
pub mod terminal_modes;
pub mod tracing_setup;
