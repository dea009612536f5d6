//! Clipboard reads for "paste URL"
//!
//! Reads go through arboard (X11/Wayland/macOS/Windows). The picker never
//! writes to the clipboard. A fixed text can be installed for tests so the
//! system clipboard is never touched.

use std::fmt;
use std::sync::Mutex;

/// Keeps one arboard handle for the process. On X11 creating a fresh
/// handle per read is slow and may race with the owner.
static SYSTEM_CLIPBOARD: Mutex<Option<arboard::Clipboard>> = Mutex::new(None);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard could be opened
    Unavailable(String),
    /// The clipboard holds no text
    Empty,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "clipboard unavailable: {}", msg),
            ClipboardError::Empty => write!(f, "clipboard is empty"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Clipboard reader
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    /// When set, `paste` returns this instead of reading the system clipboard
    fixed: Option<String>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self { fixed: None }
    }

    /// A clipboard that always yields `text` (for tests)
    pub fn with_fixed_text(text: impl Into<String>) -> Self {
        Self {
            fixed: Some(text.into()),
        }
    }

    /// Current clipboard text with surrounding whitespace removed
    pub fn paste(&self) -> Result<String, ClipboardError> {
        let text = match &self.fixed {
            Some(text) => text.clone(),
            None => Self::read_system()?,
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ClipboardError::Empty);
        }
        Ok(trimmed.to_string())
    }

    fn read_system() -> Result<String, ClipboardError> {
        let mut guard = SYSTEM_CLIPBOARD
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        if guard.is_none() {
            match arboard::Clipboard::new() {
                Ok(cb) => *guard = Some(cb),
                Err(e) => {
                    tracing::debug!("arboard clipboard init failed: {}", e);
                    return Err(ClipboardError::Unavailable(e.to_string()));
                }
            }
        }

        let Some(clipboard) = guard.as_mut() else {
            return Err(ClipboardError::Unavailable("not initialised".to_string()));
        };
        match clipboard.get_text() {
            Ok(text) => {
                tracing::debug!("Read {} bytes from clipboard", text.len());
                Ok(text)
            }
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(e) => {
                tracing::debug!("arboard paste failed: {}", e);
                // Drop the handle so the next read starts over
                *guard = None;
                Err(ClipboardError::Unavailable(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_text_is_trimmed() {
        let clipboard = Clipboard::with_fixed_text("  https://example.com/a.iso\n");
        assert_eq!(clipboard.paste().unwrap(), "https://example.com/a.iso");
    }

    #[test]
    fn test_blank_text_is_empty() {
        let clipboard = Clipboard::with_fixed_text(" \n\t");
        assert_eq!(clipboard.paste(), Err(ClipboardError::Empty));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClipboardError::Unavailable("no display".into()).to_string(),
            "clipboard unavailable: no display"
        );
    }
}
