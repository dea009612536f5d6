//! Reusable form controls

pub mod text_input;

pub use text_input::TextInputState;

/// Focus state shared by controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
}
