//! Aggregate size of a directory tree
//!
//! Used after a download completes to report how many bytes ended up in the
//! target directory. The walk runs synchronously on the calling thread.

use std::fmt;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Result of a size walk: the bytes counted so far and the error that ended
/// the walk, if any. A partial total is kept alongside the error so the caller
/// can decide whether it is still worth showing.
#[derive(Debug)]
pub struct DirSize {
    pub bytes: u64,
    pub error: Option<io::Error>,
}

impl DirSize {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for DirSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "{}", format_size(self.bytes)),
            Some(e) => write!(f, "{} (incomplete: {})", format_size(self.bytes), e),
        }
    }
}

/// Recursively sum the byte length of every non-directory entry under `path`.
///
/// `path` itself is visited first, so a regular file passed directly counts
/// its own size. Symlinks are not followed and count their own length.
/// The walk stops at the first error.
pub fn total_size(path: &Path) -> DirSize {
    let mut bytes = 0u64;

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Size walk of {:?} stopped: {}", path, e);
                return DirSize {
                    bytes,
                    error: Some(e.into()),
                };
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        match entry.metadata() {
            Ok(meta) => bytes += meta.len(),
            Err(e) => {
                tracing::warn!("Size walk of {:?} stopped at {:?}: {}", path, entry.path(), e);
                return DirSize {
                    bytes,
                    error: Some(e.into()),
                };
            }
        }
    }

    tracing::debug!("Total size of {:?}: {} bytes", path, bytes);
    DirSize { bytes, error: None }
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
