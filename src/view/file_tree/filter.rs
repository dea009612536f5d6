//! Hidden-entry rule shared by the tree and the file list
//!
//! Only the final path segment is examined. If it contains a `.` anywhere the
//! entry is hidden. This hides dotfiles and also every name with an
//! extension, which is the established behaviour of the picker: it is a
//! directory chooser first, and the list shows extension-less entries only.

/// Characters treated as path separators when locating the final segment.
fn is_separator(c: char) -> bool {
    c == '/' || c == std::path::MAIN_SEPARATOR
}

/// The substring after the last separator (the whole string if there is none).
pub fn final_segment(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Returns true if the entry at `path` must not be shown.
pub fn is_hidden(path: &str) -> bool {
    final_segment(path).contains('.')
}

/// One pass over `paths`, keeping the visible ones in their original order.
pub fn retain_visible<I>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    paths.into_iter().filter(|p| !is_hidden(p)).collect()
}
