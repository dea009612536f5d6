//! Small helpers shared by the renderers

pub mod display_width;
