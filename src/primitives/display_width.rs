//! Terminal column widths for Unicode text
//!
//! Paths may contain CJK names or emoji, so layout never counts chars.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns taken by one character (0 for control characters)
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Columns taken by a string
#[inline]
pub fn str_width(s: &str) -> usize {
    s.width()
}

/// Longest prefix of `s` that fits in `max_width` columns
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        width += char_width(ch);
        if width > max_width {
            return &s[..idx];
        }
    }
    s
}

/// Keep the end of `s` so it fits in `max_width` columns, marking the cut
/// with a leading ellipsis. Long paths stay readable this way.
pub fn truncate_start(s: &str, max_width: usize) -> String {
    if str_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut width = 0;
    let mut start = s.len();
    for (idx, ch) in s.char_indices().rev() {
        let w = char_width(ch);
        if width + w > budget {
            break;
        }
        width += w;
        start = idx;
    }
    format!("…{}", &s[start..])
}
