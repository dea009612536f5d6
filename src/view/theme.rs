use ratatui::style::Color;

/// Colours used by the picker's panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name ("dark" or "light")
    pub name: String,

    pub bg: Color,
    pub fg: Color,
    pub cursor: Color,
    pub selection_bg: Color,
    pub inactive_selection_bg: Color,

    pub border_fg: Color,
    pub title_fg: Color,

    // File list classification
    pub directory_fg: Color,
    pub file_fg: Color,

    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub status_error_fg: Color,

    pub input_placeholder_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            bg: Color::Rgb(30, 30, 30),
            fg: Color::Rgb(212, 212, 212),
            cursor: Color::Rgb(82, 139, 255),
            selection_bg: Color::Rgb(38, 79, 120),
            inactive_selection_bg: Color::Rgb(45, 45, 48),
            border_fg: Color::Rgb(80, 80, 80),
            title_fg: Color::Rgb(140, 140, 140),
            directory_fg: Color::Rgb(86, 156, 214),
            file_fg: Color::Rgb(212, 212, 212),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Rgb(0, 122, 204),
            status_error_fg: Color::Rgb(255, 120, 120),
            input_placeholder_fg: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            bg: Color::Rgb(255, 255, 255),
            fg: Color::Rgb(30, 30, 30),
            cursor: Color::Rgb(0, 90, 200),
            selection_bg: Color::Rgb(173, 214, 255),
            inactive_selection_bg: Color::Rgb(229, 235, 241),
            border_fg: Color::Rgb(200, 200, 200),
            title_fg: Color::Rgb(100, 100, 100),
            directory_fg: Color::Rgb(0, 92, 197),
            file_fg: Color::Rgb(30, 30, 30),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Rgb(0, 102, 184),
            status_error_fg: Color::Rgb(180, 0, 0),
            input_placeholder_fg: Color::Gray,
        }
    }

    /// Look up a built-in theme; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!("Unknown theme {:?}, using dark", other);
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
