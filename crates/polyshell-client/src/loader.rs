//! Snippet loading capability.
//!
//! Backends resolve on-disk snippets through this trait so the dispatch
//! core stays free of filesystem concerns. Missing files are not an
//! error: they read as absent and the caller substitutes an empty string.

use std::fs;
use std::path::{Path, PathBuf};

/// Capability for loading snippet content by relative path.
pub trait FileLoader {
    /// Content of the file at `path`, or `None` when it does not exist
    /// or cannot be read.
    fn load(&self, path: &Path) -> Option<String>;
}

/// Filesystem-backed loader rooted at a base directory.
#[derive(Debug, Clone)]
pub struct DirLoader {
    base: PathBuf,
}

impl DirLoader {
    /// Create a loader rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl FileLoader for DirLoader {
    fn load(&self, path: &Path) -> Option<String> {
        fs::read_to_string(self.base.join(path)).ok()
    }
}
