//! core::paths
//!
//! Centralized path routing for store locations.
//!
//! # Storage Layout
//!
//! A file store is a directory:
//! - `pages.json` - The page document
//! - `pages.json.tmp` - Staging file for atomic replacement
//! - `lock` - Exclusive lock file
//! - `config.toml` - Store configuration
//!
//! No code outside this module should join these names onto a store root.
//!
//! # Example
//!
//! ```
//! use pagetree::core::paths::StorePaths;
//! use std::path::PathBuf;
//!
//! let paths = StorePaths::new("/srv/site");
//!
//! assert_eq!(paths.pages_path(), PathBuf::from("/srv/site/pages.json"));
//! assert_eq!(paths.config_path(), PathBuf::from("/srv/site/config.toml"));
//! ```

use std::path::{Path, PathBuf};

/// File name of the page document.
pub const PAGES_FILE: &str = "pages.json";

/// Path routing for one store directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    /// Create paths rooted at a store directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the page document.
    pub fn pages_path(&self) -> PathBuf {
        self.root.join(PAGES_FILE)
    }

    /// Staging file written before the page document is replaced.
    pub fn pages_temp_path(&self) -> PathBuf {
        self.root.join(format!("{}.tmp", PAGES_FILE))
    }

    /// Path to the store lock file.
    pub fn lock_path(&self) -> PathBuf {
        self.root.join("lock")
    }

    /// Path to the store configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Whether the page document exists.
    pub fn is_initialized(&self) -> bool {
        self.pages_path().is_file()
    }

    /// Ensure the store directory exists.
    ///
    /// # Errors
    ///
    /// Returns an IO error if directory creation fails.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let paths = StorePaths::new("/srv/site");
        assert_eq!(paths.root(), Path::new("/srv/site"));
        assert_eq!(paths.lock_path(), PathBuf::from("/srv/site/lock"));
        assert_eq!(
            paths.pages_temp_path(),
            PathBuf::from("/srv/site/pages.json.tmp")
        );
    }

    #[test]
    fn ensure_dirs_creates_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = StorePaths::new(temp.path().join("nested").join("store"));

        assert!(!paths.root().exists());
        paths.ensure_dirs().unwrap();
        assert!(paths.root().is_dir());
        assert!(!paths.is_initialized());
    }
}
