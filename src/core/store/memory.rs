//! core::store::memory
//!
//! Process-local page store.

use std::sync::RwLock;

use super::{upsert, PageStore, Revision, Snapshot, StoreError};
use crate::core::page::Page;

/// In-memory store with the same CAS contract as [`FileStore`](super::FileStore).
///
/// # Example
///
/// ```
/// use pagetree::core::store::{MemoryStore, PageStore, Revision, StoreError};
///
/// let store = MemoryStore::new();
/// let r1 = store.commit(Revision::INITIAL, &[]).unwrap();
///
/// // A stale writer is rejected
/// assert!(matches!(
///     store.commit(Revision::INITIAL, &[]),
///     Err(StoreError::RevisionMismatch { .. })
/// ));
/// assert_eq!(store.load().unwrap().revision, r1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Snapshot>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `pages` as-is, without any checks.
    ///
    /// Useful for seeding legacy or inconsistent state.
    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            state: RwLock::new(Snapshot {
                revision: Revision::INITIAL,
                pages,
            }),
        }
    }
}

impl PageStore for MemoryStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.clone())
    }

    fn commit(&self, expected: Revision, pages: &[Page]) -> Result<Revision, StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
        if state.revision != expected {
            return Err(StoreError::RevisionMismatch {
                expected,
                actual: state.revision,
            });
        }

        upsert(&mut state.pages, pages);
        state.revision = state.revision.next();
        tracing::debug!(revision = %state.revision, pages = pages.len(), "memory store commit");
        Ok(state.revision)
    }
}
