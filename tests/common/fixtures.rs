// Directory tree fixtures

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree used as the only navigation root.
///
/// The directory name avoids the leading dot of tempfile's default prefix,
/// which would make the root itself hidden.
pub struct TestFixture {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestFixture {
    /// Create an empty root directory
    pub fn new() -> io::Result<Self> {
        let temp_dir = tempfile::Builder::new().prefix("nav").tempdir()?;
        let root = temp_dir.path().canonicalize()?;
        Ok(TestFixture {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// The layout most tests share. Names containing a dot are hidden from
    /// both the tree and the list.
    ///
    /// ```text
    /// root/
    ///   .cache/
    ///   docs/
    ///     README
    ///     guide/
    ///       intro
    ///       setup.md
    ///   music/
    ///   notes
    ///   photo.jpg
    /// ```
    pub fn standard() -> io::Result<Self> {
        let fixture = Self::new()?;
        fixture.dir(".cache")?;
        fixture.file("docs/README", "read me\n")?;
        fixture.file("docs/guide/intro", "# intro\n")?;
        fixture.file("docs/guide/setup.md", "# setup\n")?;
        fixture.dir("music")?;
        fixture.file("notes", "n")?;
        fixture.file("photo.jpg", "0123456789")?;
        Ok(fixture)
    }

    /// Create a directory (and its parents) below the root
    pub fn dir(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.root.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Create a file below the root with `content`
    pub fn file(&self, relative: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Absolute path string of `relative`, as the navigation model spells it
    pub fn path(&self, relative: &str) -> String {
        if relative.is_empty() {
            return path_string(&self.root);
        }
        path_string(&self.root.join(relative))
    }

    pub fn root_string(&self) -> String {
        path_string(&self.root)
    }
}

pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
