//! core::store
//!
//! Page persistence.
//!
//! # Architecture
//!
//! The lifecycle never writes records one at a time. A save computes every
//! changed page on a working copy and hands the whole set to
//! [`PageStore::commit`] together with the revision it loaded. The store
//! applies the set atomically or not at all.
//!
//! # CAS Semantics
//!
//! Every commit carries the revision the caller read. If another writer
//! committed in between, the commit fails with
//! [`StoreError::RevisionMismatch`] and nothing is written. Callers decide
//! whether to reload and retry; the core never does.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local, for tests and embedding
//! - [`FileStore`] - one JSON document per store directory

pub mod file;
pub mod memory;
pub mod schema;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::lock::LockError;
use crate::core::page::Page;

/// Monotonic store revision. Every successful commit increments it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Revision of a freshly initialized store.
    pub const INITIAL: Revision = Revision(0);

    /// Create a revision from its number.
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    /// The revision following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Revision number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Every stored page at one revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub revision: Revision,
    pub pages: Vec<Page>,
}

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store has not been initialized.
    #[error("no page store at {0}")]
    NotInitialized(PathBuf),

    /// The store already exists.
    #[error("page store already exists at {0}")]
    AlreadyInitialized(PathBuf),

    /// Another writer committed since the caller loaded.
    #[error("revision mismatch: expected {expected}, found {actual}")]
    RevisionMismatch { expected: Revision, actual: Revision },

    /// Another process holds the store lock.
    #[error("store is locked by another process")]
    Locked,

    /// Lock could not be taken for another reason.
    #[error("lock error: {0}")]
    Lock(LockError),

    /// Failed to parse the store document.
    #[error("failed to parse store document: {0}")]
    Parse(String),

    /// The document is not a page store.
    #[error("invalid kind '{found}', expected '{}'", schema::STORE_KIND)]
    InvalidKind { found: String },

    /// The document was written by an unsupported version.
    #[error("unsupported schema version {0}, supported: {}", schema::SCHEMA_VERSION)]
    UnsupportedVersion(u32),

    /// Failed to serialize the store document.
    #[error("failed to serialize store document: {0}")]
    Serialize(String),

    /// Filesystem error.
    #[error("i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A thread panicked while holding the store.
    #[error("store state poisoned by a panicked writer")]
    Poisoned,
}

impl From<LockError> for StoreError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::AlreadyLocked => StoreError::Locked,
            other => StoreError::Lock(other),
        }
    }
}

/// Persistence for page records.
///
/// Implementations must make [`commit`](PageStore::commit) all-or-nothing.
pub trait PageStore {
    /// Read every page and the current revision.
    fn load(&self) -> Result<Snapshot, StoreError>;

    /// Upsert `pages` if the store is still at `expected`.
    ///
    /// Returns the new revision.
    ///
    /// # Errors
    ///
    /// [`StoreError::RevisionMismatch`] if the store moved past `expected`.
    fn commit(&self, expected: Revision, pages: &[Page]) -> Result<Revision, StoreError>;
}

impl<S: PageStore + ?Sized> PageStore for &S {
    fn load(&self) -> Result<Snapshot, StoreError> {
        (**self).load()
    }

    fn commit(&self, expected: Revision, pages: &[Page]) -> Result<Revision, StoreError> {
        (**self).commit(expected, pages)
    }
}

/// Replace pages by id and append new ones, preserving stored order.
pub(crate) fn upsert(stored: &mut Vec<Page>, changed: &[Page]) {
    for page in changed {
        match stored.iter_mut().find(|p| p.id == page.id) {
            Some(slot) => *slot = page.clone(),
            None => stored.push(page.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PageId, Slug};

    #[test]
    fn revision_ordering() {
        let r = Revision::INITIAL;
        assert_eq!(r.get(), 0);
        assert!(r.next() > r);
        assert_eq!(r.next().to_string(), "r1");
    }

    #[test]
    fn upsert_replaces_and_appends() {
        let a = Page::new(PageId::new(), "A", Slug::new("a").unwrap());
        let b = Page::new(PageId::new(), "B", Slug::new("b").unwrap());
        let mut stored = vec![a.clone()];

        let mut renamed = a.clone();
        renamed.title = "A2".into();
        upsert(&mut stored, &[renamed, b.clone()]);

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].title, "A2");
        assert_eq!(stored[1].id, b.id);
    }

    #[test]
    fn lock_error_maps_to_locked() {
        assert!(matches!(
            StoreError::from(LockError::AlreadyLocked),
            StoreError::Locked
        ));
        assert!(matches!(
            StoreError::from(LockError::AcquireFailed("x".into())),
            StoreError::Lock(_)
        ));
    }
}
