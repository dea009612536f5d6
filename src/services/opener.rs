//! "Open folder": show a directory in the platform file manager

use std::io;
use std::path::Path;

/// Launches an external viewer for a directory
pub trait FolderOpener: Send + Sync {
    fn open_folder(&self, path: &Path) -> io::Result<()>;
}

/// Uses the platform opener (`xdg-open`, `open`, `explorer`) without waiting
/// for it to exit
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl FolderOpener for SystemOpener {
    fn open_folder(&self, path: &Path) -> io::Result<()> {
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", path.display()),
            ));
        }
        tracing::info!("Opening folder {:?}", path);
        open::that_detached(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_folder_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = SystemOpener
            .open_folder(&temp_dir.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
