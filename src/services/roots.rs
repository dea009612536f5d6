//! Filesystem roots that seed the top level of the tree

use std::path::{Path, PathBuf};

/// Supplies the list of top-level locations shown in the tree
pub trait RootsProvider {
    fn roots(&self) -> Vec<String>;
}

/// Roots of the running system plus any configured extras.
///
/// Unix has the single root `/`. Windows gets every drive letter that
/// currently exists.
#[derive(Debug, Clone, Default)]
pub struct SystemRoots {
    extra: Vec<PathBuf>,
}

impl SystemRoots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra roots, appended after the system ones when they exist
    pub fn with_extra(mut self, extra: Vec<PathBuf>) -> Self {
        self.extra = extra;
        self
    }

    #[cfg(unix)]
    fn system_roots() -> Vec<String> {
        vec!["/".to_string()]
    }

    #[cfg(windows)]
    fn system_roots() -> Vec<String> {
        (b'A'..=b'Z')
            .map(|letter| format!("{}:\\", letter as char))
            .filter(|root| Path::new(root).is_dir())
            .collect()
    }

    #[cfg(not(any(unix, windows)))]
    fn system_roots() -> Vec<String> {
        vec![std::path::MAIN_SEPARATOR.to_string()]
    }
}

impl RootsProvider for SystemRoots {
    fn roots(&self) -> Vec<String> {
        let mut roots = Self::system_roots();
        for extra in &self.extra {
            if !is_usable_root(extra) {
                tracing::warn!("Ignoring extra root {:?}: not an absolute directory", extra);
                continue;
            }
            let extra = extra.to_string_lossy().into_owned();
            if !roots.contains(&extra) {
                roots.push(extra);
            }
        }
        tracing::debug!("Tree roots: {:?}", roots);
        roots
    }
}

fn is_usable_root(path: &Path) -> bool {
    path.is_absolute() && path.is_dir()
}
