//! Application state and event handling
//!
//! `coordinator` is the navigation state machine and needs no terminal.
//! The rest wires it to crossterm input, ratatui output and the services.

pub mod coordinator;
#[cfg(feature = "runtime")]
mod input;
#[cfg(feature = "runtime")]
mod picker;
#[cfg(feature = "runtime")]
mod render;

pub use coordinator::{NavEvent, NavOutcome, SelectionCoordinator, SelectionState};
#[cfg(feature = "runtime")]
pub use picker::{App, Focus, StatusMessage};
