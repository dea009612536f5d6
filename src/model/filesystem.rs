//! Filesystem abstraction for the navigation model
//!
//! Every read the tree, the file list and the coordinator perform goes through
//! the [`FileSystem`] trait, so the navigation code can run against:
//! - `StdFileSystem`: native filesystem using `std::fs`
//! - `NoopFileSystem`: placeholder that fails every call
//! - test doubles that inject per-entry failures
//!
//! The trait is synchronous. Navigation happens on the UI thread in direct
//! response to user events, and no call is cancellable once started.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// ============================================================================
// Directory Entry Types
// ============================================================================

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by `read_dir`
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Full path to the entry
    pub path: PathBuf,
    /// File/directory name (last component of path)
    pub name: String,
    /// Type of entry, as reported without following symlinks
    pub entry_type: EntryType,
}

impl DirEntry {
    pub fn new(path: PathBuf, name: String, entry_type: EntryType) -> Self {
        Self {
            path,
            name,
            entry_type,
        }
    }

    /// Returns true only for real directories. A symlink to a directory is
    /// not descended into by the tree.
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_symlink(&self) -> bool {
        self.entry_type == EntryType::Symlink
    }

    /// Full path as the string the UI surfaces traffic in. `read_dir`
    /// only returns entries with UTF-8 names, so nothing is lost here for
    /// entries under a UTF-8 directory.
    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

// ============================================================================
// Metadata Types
// ============================================================================

/// Metadata about a file or directory
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Size in bytes
    pub size: u64,
    /// Whether the path is a directory
    pub is_dir: bool,
    /// Last modification time
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn new(size: u64, is_dir: bool) -> Self {
        Self {
            size,
            is_dir,
            modified: None,
        }
    }

    /// Builder: set modified time
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }
}

impl Default for FileMetadata {
    fn default() -> Self {
        Self::new(0, false)
    }
}

// ============================================================================
// FileSystem Trait
// ============================================================================

/// Read-only filesystem operations used by navigation
pub trait FileSystem: Send + Sync {
    /// List entries in a directory (non-recursive)
    ///
    /// Entries whose name or type cannot be read are left out of the result
    /// instead of failing the whole listing. An error is returned only when
    /// the directory itself cannot be opened.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Get file/directory metadata, following symlinks
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Get metadata without following symlinks
    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    /// Check if path is a directory (following symlinks)
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(self.metadata(path)?.is_dir)
    }

    /// Get canonical (absolute, normalized) path
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

// ============================================================================
// StdFileSystem Implementation
// ============================================================================

/// Standard filesystem implementation using `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    fn build_metadata(meta: &std::fs::Metadata) -> FileMetadata {
        let metadata = FileMetadata::new(meta.len(), meta.is_dir());
        match meta.modified() {
            Ok(modified) => metadata.with_modified(modified),
            Err(_) => metadata,
        }
    }
}

impl FileSystem for StdFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {:?}: {}", path, e);
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    tracing::debug!("Skipping {:?}: {}", entry.path(), e);
                    continue;
                }
            };

            let entry_type = if file_type.is_dir() {
                EntryType::Directory
            } else if file_type.is_symlink() {
                EntryType::Symlink
            } else {
                EntryType::File
            };

            // Paths travel as strings through the tree, the list and the
            // path field, so a name that is not UTF-8 could not be reached
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::debug!("Skipping non-UTF-8 name {:?} in {:?}", raw, path);
                    continue;
                }
            };
            entries.push(DirEntry::new(entry.path(), name, entry_type));
        }
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let meta = std::fs::metadata(path)?;
        Ok(Self::build_metadata(&meta))
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let meta = std::fs::symlink_metadata(path)?;
        Ok(Self::build_metadata(&meta))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

// ============================================================================
// NoopFileSystem Implementation
// ============================================================================

/// No-op filesystem that returns errors for all operations
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileSystem;

impl NoopFileSystem {
    fn unsupported<T>() -> io::Result<T> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Filesystem not available",
        ))
    }
}

impl FileSystem for NoopFileSystem {
    fn read_dir(&self, _path: &Path) -> io::Result<Vec<DirEntry>> {
        Self::unsupported()
    }

    fn metadata(&self, _path: &Path) -> io::Result<FileMetadata> {
        Self::unsupported()
    }

    fn symlink_metadata(&self, _path: &Path) -> io::Result<FileMetadata> {
        Self::unsupported()
    }

    fn canonicalize(&self, _path: &Path) -> io::Result<PathBuf> {
        Self::unsupported()
    }
}

// ============================================================================
// Tests
// ============================================================================
