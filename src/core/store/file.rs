//! core::store::file
//!
//! Page store backed by a JSON document.
//!
//! # Storage
//!
//! - `<store>/pages.json` - [`StoreDocumentV1`]
//!
//! # Invariants
//!
//! - Commits hold the [`StoreLock`] across read, revision check and write
//! - The document is replaced via temp file, fsync and rename; readers
//!   see either the old or the new document, never a partial one
//! - Loading takes no lock

use std::fs;
use std::io::Write;
use std::path::Path;

use super::schema::{parse_document, StoreDocumentV1};
use super::{upsert, PageStore, Revision, Snapshot, StoreError};
use crate::core::lock::StoreLock;
use crate::core::page::Page;
use crate::core::paths::StorePaths;

/// JSON file store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    paths: StorePaths,
}

impl FileStore {
    /// Create an empty store at `root`.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyInitialized`] if `root` already holds a store.
    pub fn init(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let paths = StorePaths::new(root.as_ref());
        let _lock = StoreLock::acquire(&paths)?;

        if paths.is_initialized() {
            return Err(StoreError::AlreadyInitialized(paths.root().to_path_buf()));
        }

        let store = Self { paths };
        store.write_document(&StoreDocumentV1::new(Revision::INITIAL, Vec::new()))?;
        tracing::info!(store = %store.paths.root().display(), "initialized page store");
        Ok(store)
    }

    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotInitialized`] if `root` holds no store.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let paths = StorePaths::new(root.as_ref());
        if !paths.is_initialized() {
            return Err(StoreError::NotInitialized(paths.root().to_path_buf()));
        }
        Ok(Self { paths })
    }

    /// Path routing for this store.
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    fn read_document(&self) -> Result<StoreDocumentV1, StoreError> {
        let path = self.paths.pages_path();
        let json = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotInitialized(self.paths.root().to_path_buf())
            } else {
                StoreError::Io { path, source }
            }
        })?;
        parse_document(&json)
    }

    fn write_document(&self, doc: &StoreDocumentV1) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(doc).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let temp_path = self.paths.pages_temp_path();
        let mut file = fs::File::create(&temp_path).map_err(io_err(&temp_path))?;
        file.write_all(json.as_bytes())
            .map_err(io_err(&temp_path))?;
        file.sync_all().map_err(io_err(&temp_path))?;

        let target = self.paths.pages_path();
        fs::rename(&temp_path, &target).map_err(io_err(&target))?;
        Ok(())
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

impl PageStore for FileStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        Ok(self.read_document()?.into_snapshot())
    }

    fn commit(&self, expected: Revision, pages: &[Page]) -> Result<Revision, StoreError> {
        let _lock = StoreLock::acquire(&self.paths)?;

        let mut doc = self.read_document()?;
        if doc.revision != expected {
            return Err(StoreError::RevisionMismatch {
                expected,
                actual: doc.revision,
            });
        }

        upsert(&mut doc.pages, pages);
        doc.revision = doc.revision.next();
        self.write_document(&doc)?;

        tracing::info!(
            store = %self.paths.root().display(),
            revision = %doc.revision,
            pages = pages.len(),
            "committed pages"
        );
        Ok(doc.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PageId, Slug};
    use tempfile::TempDir;

    fn page(slug: &str) -> Page {
        Page::new(PageId::new(), slug, Slug::new(slug).unwrap())
    }

    #[test]
    fn init_then_open() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");

        FileStore::init(&root).unwrap();
        let store = FileStore::open(&root).unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.revision, Revision::INITIAL);
        assert!(snapshot.pages.is_empty());
    }

    #[test]
    fn init_twice_fails() {
        let temp = TempDir::new().unwrap();
        FileStore::init(temp.path()).unwrap();
        assert!(matches!(
            FileStore::init(temp.path()),
            Err(StoreError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn open_missing_store_fails() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            FileStore::open(temp.path()),
            Err(StoreError::NotInitialized(_))
        ));
    }

    #[test]
    fn commit_persists_across_handles() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::init(temp.path()).unwrap();
        let a = page("a");

        let r1 = store.commit(Revision::INITIAL, &[a.clone()]).unwrap();

        let reopened = FileStore::open(temp.path()).unwrap().load().unwrap();
        assert_eq!(reopened.revision, r1);
        assert_eq!(reopened.pages, vec![a]);
        assert!(!store.paths().pages_temp_path().exists());
    }

    #[test]
    fn stale_commit_rejected() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::init(temp.path()).unwrap();
        store.commit(Revision::INITIAL, &[page("a")]).unwrap();

        let err = store.commit(Revision::INITIAL, &[page("b")]).unwrap_err();
        assert!(matches!(err, StoreError::RevisionMismatch { .. }));
        assert_eq!(store.load().unwrap().pages.len(), 1);
    }

    #[test]
    fn commit_fails_fast_while_locked() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::init(temp.path()).unwrap();

        let _held = StoreLock::acquire(store.paths()).unwrap();
        assert!(matches!(
            store.commit(Revision::INITIAL, &[page("a")]),
            Err(StoreError::Locked)
        ));
    }

    #[test]
    fn corrupt_document_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::init(temp.path()).unwrap();
        fs::write(store.paths().pages_path(), "{\"kind\":").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
    }
}
